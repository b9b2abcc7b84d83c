//! ECS error types.

use crate::component::ComponentTypeId;
use crate::entity::Entity;
use crate::id::{InstanceId, SystemId};

/// Errors returned by ECS construction and lookup operations.
///
/// None of these are fatal to the engine; callers check and carry on.
#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    /// The component type table reached its configured capacity.
    #[error("component type table is full ({capacity} types)")]
    TypeTableFull { capacity: usize },

    /// A component type or system with this name is already registered.
    #[error("name '{0}' is already registered")]
    NameCollision(String),

    /// Names must be non-empty.
    #[error("name must not be empty")]
    InvalidName,

    /// No component type with this id is registered.
    #[error("unknown component type {0}")]
    UnknownType(ComponentTypeId),

    /// The entity is not live.
    #[error("unknown entity {0}")]
    UnknownEntity(Entity),

    /// The entity table reached its configured capacity.
    #[error("entity table is full ({capacity} entities)")]
    EntityTableFull { capacity: usize },

    /// Component instance storage reached its configured capacity.
    #[error("component storage exhausted ({capacity} instances)")]
    StorageExhausted { capacity: usize },

    /// The instance id is already live.
    #[error("instance {0} is already live")]
    DuplicateInstance(InstanceId),

    /// The system table reached its configured capacity.
    #[error("system table is full ({capacity} systems)")]
    SystemTableFull { capacity: usize },

    /// No system with this id is registered.
    #[error("unknown system {0}")]
    UnknownSystem(SystemId),
}
