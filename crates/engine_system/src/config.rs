//! System configuration.

use engine_component::SystemId;
use serde::{Deserialize, Serialize};

/// Configuration for one system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Unique system name (e.g. `"scripts"`). Hashed into the [`SystemId`].
    pub name: String,
}

impl SystemConfig {
    /// Create a new system config with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The id this system will be registered under.
    #[must_use]
    pub fn id(&self) -> SystemId {
        SystemId::from_name(&self.name)
    }
}
