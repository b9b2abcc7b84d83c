//! Core [`Component`] trait and component type metadata.
//!
//! A component is a unit of data plus behaviour attached to exactly one
//! entity. Behaviour is expressed through three lifecycle callbacks:
//!
//! | callback  | when                                                        |
//! |-----------|-------------------------------------------------------------|
//! | `start`   | once, on the first tick after the instance was attached     |
//! | `update`  | every tick, whenever the owning system's driver asks for it |
//! | `destroy` | once, synchronously when the instance is detached           |
//!
//! ## Type identity
//!
//! [`ComponentTypeId`] is derived from the type's **string name** using
//! FNV-1a 64-bit (see [`fnv1a`](crate::id::fnv1a)). Several component types may
//! share one Rust type: the scripting bridge registers one type per script
//! class, all backed by the same struct with different prototypes.

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::entity::Entity;
use crate::id::{InstanceId, SystemId, fnv1a};

/// A unique identifier for a component type, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// The null / invalid component type sentinel.
    pub const INVALID: ComponentTypeId = ComponentTypeId(0);

    /// Compute the [`ComponentTypeId`] of the type registered as `name`.
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        Self(fnv1a(name))
    }

    /// Returns `true` if this is not the sentinel.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// The common header every component instance carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentHeader {
    /// Identifier of this instance.
    pub id: InstanceId,
    /// Identifier of the instance's component type.
    pub type_id: ComponentTypeId,
    /// Back-reference to the owning entity. Non-owning.
    pub entity: Entity,
}

/// Which lifecycle callback to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Update,
    Destroy,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::Start => "start",
            Phase::Update => "update",
            Phase::Destroy => "destroy",
        })
    }
}

/// Describes one registered component type.
#[derive(Debug, Clone)]
pub struct ComponentType {
    /// The unique type identifier.
    pub id: ComponentTypeId,
    /// The name the type was registered under.
    pub name: String,
    /// Size of one stored instance (header plus value) in bytes.
    pub instance_size: usize,
    /// The system whose traversal list receives new instances.
    pub system: SystemId,
}

/// The core component trait.
///
/// Every callback receives a [`Context`] giving access to the instance header,
/// the world's resources and the deferred command queue. Errors returned from a
/// callback are logged by the dispatcher and never abort the tick.
///
/// # Examples
///
/// ```rust
/// use engine_component::{Component, Context};
///
/// #[derive(Debug, Clone, Default)]
/// struct Counter {
///     ticks: u32,
/// }
///
/// impl Component for Counter {
///     fn update(&mut self, _cx: &mut Context<'_>) -> anyhow::Result<()> {
///         self.ticks += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Component: Any {
    /// Runs once, on the tick after the instance was attached.
    fn start(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
        let _ = cx;
        Ok(())
    }

    /// Runs whenever the owning system updates its components.
    fn update(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
        let _ = cx;
        Ok(())
    }

    /// Runs once, synchronously, when the instance is detached.
    fn destroy(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
        let _ = cx;
        Ok(())
    }
}

/// Dispatch one lifecycle phase on a component value.
pub(crate) fn run_phase<T: Component>(
    value: &mut T,
    phase: Phase,
    cx: &mut Context<'_>,
) -> anyhow::Result<()> {
    match phase {
        Phase::Start => value.start(cx),
        Phase::Update => value.update(cx),
        Phase::Destroy => value.destroy(cx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_id_from_name_is_deterministic() {
        let id = ComponentTypeId::from_name("ui");
        assert_eq!(id, ComponentTypeId::from_name("ui"));
        assert_ne!(id, ComponentTypeId::from_name("scripts/game/Test"));
    }

    #[test]
    fn test_component_type_id_matches_system_hash() {
        // Both named id kinds use the same hash.
        assert_eq!(
            ComponentTypeId::from_name("health").0,
            SystemId::from_name("health").0
        );
    }

    #[test]
    fn test_invalid_sentinel() {
        assert!(!ComponentTypeId::INVALID.is_valid());
        assert!(ComponentTypeId::from_name("ui").is_valid());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Start.to_string(), "start");
        assert_eq!(Phase::Destroy.to_string(), "destroy");
    }
}
