//! ECS scheduler: one dispatch pass over every system.
//!
//! For each system in registration order:
//!
//! 1. If components were attached since the last tick, run their `start`
//!    (dead ids are skipped), then the driver's `start` once.
//! 2. Run the driver's `update`, also when the system has no components.
//!
//! Structural changes requested during the pass sit in the command queue until
//! the world flushes it after dispatch.

use engine_component::{Commands, ComponentRegistry, EntityRegistry, Resources, Services};
use engine_system::Traversal;
use tracing::{debug, error, trace};

use crate::registry::{SystemEntry, SystemRegistry};

/// Counters for one dispatch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Systems whose driver ran.
    pub systems: usize,
    /// Components whose `start` ran.
    pub started: usize,
}

/// Run one tick of dispatch.
pub(crate) fn dispatch(
    systems: &mut SystemRegistry,
    components: &mut ComponentRegistry,
    resources: &mut Resources,
    commands: &mut Commands,
    entities: &EntityRegistry,
    tick: u64,
) -> DispatchStats {
    let mut stats = DispatchStats::default();

    for entry in systems.iter_mut() {
        let SystemEntry {
            name,
            driver,
            members,
            pending_start,
            ..
        } = entry;

        let name = name.as_str();
        let pending = std::mem::take(pending_start);
        let services = Services::new(&mut *resources, &mut *commands, entities, tick);
        let mut traversal = Traversal::new(name, members.as_slice(), &mut *components, services);

        if !pending.is_empty() {
            for &id in &pending {
                if traversal.start(id) {
                    stats.started += 1;
                } else {
                    trace!(system = %name, instance = %id, "pending start skipped, instance gone");
                }
            }
            if let Err(err) = driver.start(&mut traversal) {
                error!(system = %name, tick, error = format!("{err:#}"), "system start failed");
            }
        }

        if let Err(err) = driver.update(&mut traversal) {
            error!(system = %name, tick, error = format!("{err:#}"), "system update failed");
        }
        stats.systems += 1;
    }

    debug!(tick, systems = stats.systems, started = stats.started, "dispatch complete");
    stats
}
