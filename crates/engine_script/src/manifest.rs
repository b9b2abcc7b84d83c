//! Script manifest file.
//!
//! ```json
//! {
//!     "scripts": {
//!         "classpaths": ["scripts/game/Test", "scripts/game/Spinner"],
//!         "static": "Init"
//!     }
//! }
//! ```
//!
//! Each class path becomes a component type of the same name. The optional
//! `static` class provides the `init()` / `deinit()` hooks.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScriptError;

/// The `scripts` section of the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSection {
    /// Class paths to register as component types, in order.
    pub classpaths: Vec<String>,
    /// Class providing the static lifecycle hooks.
    #[serde(rename = "static")]
    pub static_class: Option<String>,
}

/// Parsed script manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptManifest {
    pub scripts: ScriptSection,
}

impl ScriptManifest {
    /// Load a manifest file. A missing file yields `Ok(None)`: no scripts.
    ///
    /// # Errors
    ///
    /// [`ScriptError::ManifestIo`] for read failures other than not-found,
    /// [`ScriptError::ManifestParse`] for malformed JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>, ScriptError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ScriptError::ManifestIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&text)
            .map(Some)
            .map_err(|source| ScriptError::ManifestParse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Parse manifest JSON.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the text does not match.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Returns `true` if the manifest names no classes and no static class.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scripts.classpaths.is_empty() && self.scripts.static_class.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = ScriptManifest::parse(
            r#"{ "scripts": { "classpaths": ["scripts/game/Test"], "static": "Init" } }"#,
        )
        .unwrap();
        assert_eq!(manifest.scripts.classpaths, ["scripts/game/Test"]);
        assert_eq!(manifest.scripts.static_class.as_deref(), Some("Init"));
    }

    #[test]
    fn test_missing_sections_are_empty() {
        assert!(ScriptManifest::parse("{}").unwrap().is_empty());
        assert!(ScriptManifest::parse(r#"{ "scripts": {} }"#).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_no_scripts() {
        assert_eq!(ScriptManifest::load("/no/such/scripts.json").unwrap(), None);
    }

    #[test]
    fn test_malformed_classpaths_rejected() {
        assert!(ScriptManifest::parse(r#"{ "scripts": { "classpaths": "Test" } }"#).is_err());
    }
}
