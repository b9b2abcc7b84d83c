//! Registry capacity configuration.

use serde::{Deserialize, Serialize};

/// Capacities for the ECS tables.
///
/// Every registry rejects new entries once its capacity is reached instead of
/// growing without bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcsConfig {
    /// Maximum number of registered component types.
    pub max_component_types: usize,
    /// Maximum number of live component instances across all types.
    pub max_instances: usize,
    /// Maximum number of live entities.
    pub max_entities: usize,
    /// Maximum number of registered systems, including the built-in one.
    pub max_systems: usize,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            max_component_types: 256,
            max_instances: 65_536,
            max_entities: 65_536,
            max_systems: 64,
        }
    }
}
