//! Per-callback execution context.
//!
//! A [`Context`] is built for every lifecycle callback. It exposes the
//! instance header, world resources, read-only entity data and the deferred
//! command queue. The registries that own component storage are never
//! reachable from here, which is what makes in-callback mutation safe.

use crate::command::Commands;
use crate::component::{ComponentHeader, ComponentTypeId};
use crate::entity::{Entity, EntityRegistry};
use crate::id::InstanceId;
use crate::resource::Resources;

/// The world state shared by every callback of one dispatch pass.
pub struct Services<'a> {
    pub resources: &'a mut Resources,
    pub commands: &'a mut Commands,
    pub entities: &'a EntityRegistry,
    /// Current tick number.
    pub tick: u64,
}

impl<'a> Services<'a> {
    /// Bundle the world state for a dispatch pass.
    pub fn new(
        resources: &'a mut Resources,
        commands: &'a mut Commands,
        entities: &'a EntityRegistry,
        tick: u64,
    ) -> Self {
        Self {
            resources,
            commands,
            entities,
            tick,
        }
    }

    /// Build the context for one callback on the instance described by `header`.
    pub fn context(&mut self, header: ComponentHeader) -> Context<'_> {
        Context {
            header,
            tick: self.tick,
            resources: &mut *self.resources,
            commands: &mut *self.commands,
            entities: self.entities,
        }
    }
}

/// Everything a component callback may touch.
pub struct Context<'a> {
    header: ComponentHeader,
    tick: u64,
    resources: &'a mut Resources,
    commands: &'a mut Commands,
    entities: &'a EntityRegistry,
}

impl<'a> Context<'a> {
    /// The header of the instance being called.
    #[must_use]
    pub fn header(&self) -> ComponentHeader {
        self.header
    }

    /// The id of the instance being called.
    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.header.id
    }

    /// The component type of the instance being called.
    #[must_use]
    pub fn type_id(&self) -> ComponentTypeId {
        self.header.type_id
    }

    /// The entity owning the instance being called.
    #[must_use]
    pub fn entity(&self) -> Entity {
        self.header.entity
    }

    /// The current tick number.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Get a shared reference to a resource.
    #[must_use]
    pub fn resource<T: 'static>(&self) -> Option<&T> {
        self.resources.get::<T>()
    }

    /// Get a mutable reference to a resource.
    #[must_use]
    pub fn resource_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.resources.get_mut::<T>()
    }

    /// Get a shared reference to a resource or fail with a descriptive error.
    ///
    /// # Errors
    ///
    /// Returns an error naming the missing resource type.
    pub fn require<T: 'static>(&self) -> anyhow::Result<&T> {
        self.resources.get::<T>().ok_or_else(|| {
            anyhow::anyhow!("resource `{}` is not installed", std::any::type_name::<T>())
        })
    }

    /// The deferred command queue.
    pub fn commands(&mut self) -> &mut Commands {
        &mut *self.commands
    }

    /// Read-only view of the live entities.
    #[must_use]
    pub fn entities(&self) -> &EntityRegistry {
        self.entities
    }

    /// Queue detachment of the instance being called.
    pub fn detach_self(&mut self) {
        self.commands.detach(self.header.id);
    }

    /// Queue destruction of the entity owning the instance being called.
    pub fn despawn_entity(&mut self) {
        self.commands.despawn(self.header.entity);
    }
}
