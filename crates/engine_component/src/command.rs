//! Deferred structural changes.
//!
//! Component callbacks run while the registries are being iterated, so they
//! cannot mutate them directly. Instead they push [`Command`]s onto the
//! world's [`Commands`] queue. The queue is drained in FIFO order at the end of
//! each tick (or right after a world operation that ran callbacks).
//!
//! `Commands` also owns identifier allocation. A deferred spawn or attach
//! therefore returns the real id immediately; the id becomes live when the
//! command is applied.

use std::collections::VecDeque;

use crate::component::ComponentTypeId;
use crate::entity::Entity;
use crate::id::{IdAllocator, InstanceId};

/// A queued structural change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an entity with a pre-allocated id.
    Spawn { entity: Entity, name: Option<String> },
    /// Attach a new instance of `type_id` to `entity` under a pre-allocated id.
    Attach {
        entity: Entity,
        type_id: ComponentTypeId,
        instance: InstanceId,
    },
    /// Detach (and destroy) an instance.
    Detach(InstanceId),
    /// Destroy an entity and all of its components.
    Despawn(Entity),
}

/// FIFO queue of deferred [`Command`]s plus the id allocator.
#[derive(Debug, Default)]
pub struct Commands {
    queue: VecDeque<Command>,
    ids: IdAllocator,
}

impl Commands {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh entity id without queueing anything.
    pub fn allocate_entity(&mut self) -> Entity {
        Entity(self.ids.allocate())
    }

    /// Allocate a fresh instance id without queueing anything.
    pub fn allocate_instance(&mut self) -> InstanceId {
        InstanceId(self.ids.allocate())
    }

    /// Queue creation of a new entity and return its id.
    pub fn spawn(&mut self, name: Option<&str>) -> Entity {
        let entity = self.allocate_entity();
        self.queue.push_back(Command::Spawn {
            entity,
            name: name.map(str::to_owned),
        });
        entity
    }

    /// Queue attachment of a component and return the instance id it will get.
    pub fn attach(&mut self, entity: Entity, type_id: ComponentTypeId) -> InstanceId {
        let instance = self.allocate_instance();
        self.queue.push_back(Command::Attach {
            entity,
            type_id,
            instance,
        });
        instance
    }

    /// Queue attachment of the component type registered as `name`.
    pub fn attach_named(&mut self, entity: Entity, name: &str) -> InstanceId {
        self.attach(entity, ComponentTypeId::from_name(name))
    }

    /// Queue detachment of an instance.
    pub fn detach(&mut self, instance: InstanceId) {
        self.queue.push_back(Command::Detach(instance));
    }

    /// Queue destruction of an entity.
    pub fn despawn(&mut self, entity: Entity) {
        self.queue.push_back(Command::Despawn(entity));
    }

    /// Take the oldest queued command.
    pub fn pop(&mut self) -> Option<Command> {
        self.queue.pop_front()
    }

    /// Number of queued commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
