//! Engine configuration file.
//!
//! ```json
//! {
//!     "ecs": { "max_entities": 1024 },
//!     "tick": { "tick_rate": 30.0, "max_ticks": 600 },
//!     "window": { "width": 800, "height": 600, "fov": 70.0 },
//!     "scripts": "scripts.json"
//! }
//! ```
//!
//! Every field is optional and falls back to its default.

use std::path::{Path, PathBuf};

use engine_component::EcsConfig;
use engine_math::{Camera, Viewport};
use serde::{Deserialize, Serialize};

use crate::tick::TickConfig;

/// Errors loading an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Initial window size and camera field of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl WindowConfig {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        Camera::new(self.viewport(), self.fov)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fov: 90.0,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub ecs: EcsConfig,
    pub tick: TickConfig,
    pub window: WindowConfig,
    /// Path of the script manifest. `None` disables scripting.
    pub scripts: Option<PathBuf>,
}

impl EngineConfig {
    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Parse`]
    /// if it is not valid JSON of the expected shape.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the text does not match.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
