//! The handle a system driver uses to walk its components.

use engine_component::{
    Commands, Component, ComponentHeader, ComponentRegistry, InstanceId, Phase, Resources,
    Services,
};
use tracing::error;

/// Per-dispatch view of one system's component list.
///
/// Built by the scheduler for every driver call. The list itself is frozen for
/// the duration of the call: structural changes requested by callbacks are
/// queued on [`Commands`] and applied at the end of the tick.
pub struct Traversal<'a> {
    system: &'a str,
    members: &'a [InstanceId],
    components: &'a mut ComponentRegistry,
    services: Services<'a>,
}

impl<'a> Traversal<'a> {
    /// Create a traversal over `members` for the system called `system`.
    pub fn new(
        system: &'a str,
        members: &'a [InstanceId],
        components: &'a mut ComponentRegistry,
        services: Services<'a>,
    ) -> Self {
        Self {
            system,
            members,
            components,
            services,
        }
    }

    /// Name of the system being driven.
    #[must_use]
    pub fn system(&self) -> &str {
        self.system
    }

    /// The current tick number.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.services.tick
    }

    /// Number of components in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the system has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Instance ids in list (insertion) order.
    #[must_use]
    pub fn ids(&self) -> &'a [InstanceId] {
        self.members
    }

    /// Header of one component.
    #[must_use]
    pub fn header(&self, id: InstanceId) -> Option<ComponentHeader> {
        self.components.header(id)
    }

    /// Typed shared access to one component.
    #[must_use]
    pub fn get<T: Component>(&self, id: InstanceId) -> Option<&T> {
        self.components.get::<T>(id)
    }

    /// Typed mutable access to one component.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self, id: InstanceId) -> Option<&mut T> {
        self.components.get_mut::<T>(id)
    }

    /// Run `start` on one component. Returns `false` if the id is not live.
    pub fn start(&mut self, id: InstanceId) -> bool {
        self.invoke(id, Phase::Start)
    }

    /// Run `update` on one component. Returns `false` if the id is not live.
    pub fn update(&mut self, id: InstanceId) -> bool {
        self.invoke(id, Phase::Update)
    }

    /// Run `update` on every component in list order.
    pub fn update_all(&mut self) {
        let members = self.members;
        for &id in members {
            self.invoke(id, Phase::Update);
        }
    }

    #[must_use]
    pub fn resources(&self) -> &Resources {
        &*self.services.resources
    }

    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut *self.services.resources
    }

    /// The deferred command queue.
    pub fn commands(&mut self) -> &mut Commands {
        &mut *self.services.commands
    }

    fn invoke(&mut self, id: InstanceId, phase: Phase) -> bool {
        match self.components.invoke(id, phase, &mut self.services) {
            None => false,
            Some(Ok(())) => true,
            Some(Err(err)) => {
                error!(
                    system = self.system,
                    instance = %id,
                    %phase,
                    error = format!("{err:#}"),
                    "component callback failed"
                );
                true
            }
        }
    }
}
