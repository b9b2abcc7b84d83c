//! The engine surface offered to scripts.
//!
//! Two implementations exist:
//!
//! - [`World`]: used while static hooks run. Entity creation and attachment
//!   apply immediately. Component destruction is queued and applied once the
//!   hook returns, because it runs `destroy` callbacks that may need the
//!   runtime the hook is holding.
//! - [`Context`]: used while component callbacks run. Everything that changes
//!   structure is queued on the world's command queue.

use engine_app::World;
use engine_component::{Context, Entity, InstanceId};
use engine_math::Vec2;
use engine_ui::Pointer;
use tracing::{debug, error, info, trace, warn};

use crate::error::ScriptError;

/// Log severities understood by scripts, in their numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Console,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Map a script-side severity number. Out-of-range values clamp to the
    /// nearest end.
    #[must_use]
    pub fn from_raw(raw: i32) -> Self {
        match raw.clamp(0, 5) {
            0 => Self::Console,
            1 => Self::Trace,
            2 => Self::Debug,
            3 => Self::Info,
            4 => Self::Warn,
            _ => Self::Error,
        }
    }

    /// Emit `message` at the matching tracing level.
    pub fn emit(self, message: &str) {
        match self {
            Self::Console => info!(target: "script", console = true, "{message}"),
            Self::Trace => trace!(target: "script", "{message}"),
            Self::Debug => debug!(target: "script", "{message}"),
            Self::Info => info!(target: "script", "{message}"),
            Self::Warn => warn!(target: "script", "{message}"),
            Self::Error => error!(target: "script", "{message}"),
        }
    }
}

/// Engine operations callable from script code.
pub trait EngineApi {
    /// Write to the engine log.
    fn log(&mut self, severity: Severity, message: &str) {
        severity.emit(message);
    }

    /// Create an entity.
    ///
    /// # Errors
    ///
    /// Fails if the entity table is full.
    fn new_entity(&mut self, name: Option<&str>) -> Result<Entity, ScriptError>;

    /// First live entity with this name.
    fn find_entity(&self, name: &str) -> Option<Entity>;

    /// Attach the component type registered as `type_name`.
    ///
    /// # Errors
    ///
    /// Fails for unknown entities or types where that can be checked
    /// immediately.
    fn attach_component(&mut self, entity: Entity, type_name: &str) -> Result<InstanceId, ScriptError>;

    /// Detach a component.
    fn destroy_component(&mut self, instance: InstanceId);

    /// Pointer position in window pixels, if pointer input is installed.
    fn pointer_position(&self) -> Option<Vec2>;
}

impl EngineApi for World {
    fn new_entity(&mut self, name: Option<&str>) -> Result<Entity, ScriptError> {
        Ok(World::new_entity(self, name)?)
    }

    fn find_entity(&self, name: &str) -> Option<Entity> {
        World::find_entity(self, name)
    }

    fn attach_component(&mut self, entity: Entity, type_name: &str) -> Result<InstanceId, ScriptError> {
        Ok(self.attach_named(entity, type_name)?)
    }

    fn destroy_component(&mut self, instance: InstanceId) {
        self.commands().detach(instance);
    }

    fn pointer_position(&self) -> Option<Vec2> {
        self.resource::<Pointer>().map(|pointer| pointer.position)
    }
}

impl EngineApi for Context<'_> {
    fn new_entity(&mut self, name: Option<&str>) -> Result<Entity, ScriptError> {
        Ok(self.commands().spawn(name))
    }

    fn find_entity(&self, name: &str) -> Option<Entity> {
        self.entities().find(name)
    }

    fn attach_component(&mut self, entity: Entity, type_name: &str) -> Result<InstanceId, ScriptError> {
        Ok(self.commands().attach_named(entity, type_name))
    }

    fn destroy_component(&mut self, instance: InstanceId) {
        self.commands().detach(instance);
    }

    fn pointer_position(&self) -> Option<Vec2> {
        self.resource::<Pointer>().map(|pointer| pointer.position)
    }
}
