//! System drivers.
//!
//! A driver implements [`System`]. Its fields are the system's private state;
//! the scheduler records their size when the system is registered.

use std::any::Any;

use engine_component::Resources;

use crate::context::Traversal;

/// The contract every system driver satisfies.
///
/// All hooks have defaults. A driver that overrides nothing behaves like
/// [`ComponentRunner`]: it updates every component in list order each tick.
pub trait System: Any {
    /// Runs on a tick where new components were started, after their
    /// component-level `start` calls.
    fn start(&mut self, traversal: &mut Traversal<'_>) -> anyhow::Result<()> {
        let _ = traversal;
        Ok(())
    }

    /// Runs every tick, also when the component list is empty.
    fn update(&mut self, traversal: &mut Traversal<'_>) -> anyhow::Result<()> {
        traversal.update_all();
        Ok(())
    }

    /// Runs once at shutdown, after every entity has been destroyed.
    fn destroy(&mut self, resources: &mut Resources) -> anyhow::Result<()> {
        let _ = resources;
        Ok(())
    }
}

/// The default driver: calls `update` on every component in list order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentRunner;

impl System for ComponentRunner {}
