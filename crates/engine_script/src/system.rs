//! The system that drives script components.

use engine_component::Resources;
use engine_system::{System, Traversal};
use tracing::{debug, trace};

use crate::runtime::ScriptHost;

/// Name of the system owning every script component type.
pub const SCRIPT_SYSTEM: &str = "scripts";

/// Driver for script components. Updates every instance in list order and
/// drops the runtime at shutdown.
#[derive(Debug, Default)]
pub struct ScriptSystem;

impl System for ScriptSystem {
    fn start(&mut self, traversal: &mut Traversal<'_>) -> anyhow::Result<()> {
        trace!(system = traversal.system(), components = traversal.len(), "script batch started");
        Ok(())
    }

    fn destroy(&mut self, resources: &mut Resources) -> anyhow::Result<()> {
        if resources.remove::<ScriptHost>().is_some() {
            debug!("script runtime dropped");
        }
        Ok(())
    }
}
