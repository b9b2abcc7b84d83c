//! The world: the explicit ECS context.
//!
//! A [`World`] owns the component registry, the entity registry, the system
//! registry, the resource map and the deferred command queue. Every ECS
//! operation goes through it; there is no global state.
//!
//! ## Immediate vs deferred
//!
//! World methods apply immediately. Component callbacks cannot reach the world
//! and queue their structural changes on [`Commands`] instead. Those are
//! applied in FIFO order at the end of [`World::tick`], or right after a
//! world method whose callbacks queued something (e.g. a `destroy` that spawns
//! a replacement).

use std::mem;

use engine_component::{
    Command, Commands, Component, ComponentRegistry, ComponentType, ComponentTypeId, EcsConfig,
    EcsError, Entity, EntityRegistry, InstanceId, Phase, Resources, Services, SystemId,
};
use engine_system::{ComponentRunner, System, SystemConfig};
use tracing::{debug, error, info, warn};

use crate::registry::{SystemEntry, SystemRegistry};
use crate::scheduler::{self, DispatchStats};

/// Name of the system that owns component types constructed without one.
pub const BUILTIN_SYSTEM: &str = "components";

type ShutdownHook = Box<dyn FnOnce(&mut World)>;

/// The complete ECS state.
pub struct World {
    components: ComponentRegistry,
    entities: EntityRegistry,
    systems: SystemRegistry,
    resources: Resources,
    commands: Commands,
    /// Number of completed ticks.
    tick: u64,
    builtin: SystemId,
    shutdown_hooks: Vec<ShutdownHook>,
    shut_down: bool,
}

impl World {
    /// Create an empty world with default capacities.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&EcsConfig::default())
    }

    /// Create an empty world with the given capacities.
    ///
    /// The built-in [`BUILTIN_SYSTEM`] is registered immediately, so at least
    /// one system slot is always available.
    #[must_use]
    pub fn with_config(config: &EcsConfig) -> Self {
        let mut systems = SystemRegistry::new(config.max_systems.max(1));
        let builtin = match systems.register(
            SystemConfig::new(BUILTIN_SYSTEM),
            Box::new(ComponentRunner),
            mem::size_of::<ComponentRunner>(),
        ) {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "built-in system not registered");
                SystemId::INVALID
            }
        };

        Self {
            components: ComponentRegistry::new(config.max_component_types, config.max_instances),
            entities: EntityRegistry::new(config.max_entities),
            systems,
            resources: Resources::new(),
            commands: Commands::new(),
            tick: 0,
            builtin,
            shutdown_hooks: Vec::new(),
            shut_down: false,
        }
    }

    // ── Types and systems ─────────────────────────────────────────

    /// Register a component type owned by the built-in system.
    ///
    /// # Errors
    ///
    /// See [`ComponentRegistry::construct_type`].
    pub fn construct_type<T: Component + Clone>(
        &mut self,
        name: &str,
        prototype: T,
    ) -> Result<ComponentTypeId, EcsError> {
        self.construct_type_for(name, prototype, self.builtin)
    }

    /// Register a component type whose instances are driven by `system`.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownSystem`] if `system` is not registered, otherwise
    /// see [`ComponentRegistry::construct_type`].
    pub fn construct_type_for<T: Component + Clone>(
        &mut self,
        name: &str,
        prototype: T,
        system: SystemId,
    ) -> Result<ComponentTypeId, EcsError> {
        if !self.systems.contains(system) {
            return Err(EcsError::UnknownSystem(system));
        }
        self.components.construct_type(name, prototype, system)
    }

    /// Register a system driver.
    ///
    /// # Errors
    ///
    /// [`EcsError::NameCollision`], [`EcsError::InvalidName`] or
    /// [`EcsError::SystemTableFull`].
    pub fn construct_system<S: System>(
        &mut self,
        config: SystemConfig,
        driver: S,
    ) -> Result<SystemId, EcsError> {
        let name = config.name.clone();
        let id = self
            .systems
            .register(config, Box::new(driver), mem::size_of::<S>())?;
        debug!(system = %name, id = %id, state_size = mem::size_of::<S>(), "system constructed");
        Ok(id)
    }

    /// Descriptor of a registered component type.
    #[must_use]
    pub fn type_info(&self, id: ComponentTypeId) -> Option<&ComponentType> {
        self.components.type_info(id)
    }

    /// Descriptor of the component type registered as `name`.
    #[must_use]
    pub fn type_by_name(&self, name: &str) -> Option<&ComponentType> {
        self.components.type_by_name(name)
    }

    /// Registered component types in registration order.
    pub fn types(&self) -> impl Iterator<Item = &ComponentType> + '_ {
        self.components.types()
    }

    /// A registered system.
    #[must_use]
    pub fn system(&self, id: SystemId) -> Option<&SystemEntry> {
        self.systems.get(id)
    }

    /// Registered systems in registration order.
    pub fn systems(&self) -> impl Iterator<Item = &SystemEntry> {
        self.systems.iter()
    }

    /// Id of the built-in system.
    #[must_use]
    pub fn builtin_system(&self) -> SystemId {
        self.builtin
    }

    // ── Entities ──────────────────────────────────────────────────

    /// Create an entity. Names need not be unique.
    ///
    /// # Errors
    ///
    /// [`EcsError::EntityTableFull`] at capacity.
    pub fn new_entity(&mut self, name: Option<&str>) -> Result<Entity, EcsError> {
        let entity = self.commands.allocate_entity();
        self.entities.insert(entity, name)?;
        debug!(entity = %entity, name, "entity created");
        Ok(entity)
    }

    /// Destroy an entity, detaching its components in attachment order first.
    ///
    /// Returns `false` if the entity is not live.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        let destroyed = self.destroy_entity_now(entity);
        self.flush_commands();
        destroyed
    }

    /// Create an entity carrying fresh instances of every component type
    /// attached to `source`, in the same order.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`] if `source` is not live, or any error of
    /// [`World::new_entity`] and [`World::attach`].
    pub fn copy_entity(&mut self, source: Entity, name: Option<&str>) -> Result<Entity, EcsError> {
        let types: Vec<ComponentTypeId> = self
            .entities
            .components(source)
            .ok_or(EcsError::UnknownEntity(source))?
            .iter()
            .filter_map(|&id| self.components.header(id))
            .map(|header| header.type_id)
            .collect();

        let copy = self.new_entity(name)?;
        for type_id in types {
            let instance = self.commands.allocate_instance();
            self.attach_now(copy, type_id, instance)?;
        }
        self.flush_commands();
        Ok(copy)
    }

    /// First entity named `name`, in creation order.
    #[must_use]
    pub fn find_entity(&self, name: &str) -> Option<Entity> {
        self.entities.find(name)
    }

    /// The name an entity was created with.
    #[must_use]
    pub fn entity_name(&self, entity: Entity) -> Option<&str> {
        self.entities.name(entity)
    }

    /// Returns `true` if the entity is live.
    #[must_use]
    pub fn contains_entity(&self, entity: Entity) -> bool {
        self.entities.contains(entity)
    }

    /// Attached instances of an entity, in attachment order.
    #[must_use]
    pub fn entity_components(&self, entity: Entity) -> Option<&[InstanceId]> {
        self.entities.components(entity)
    }

    /// First instance of `type_id` attached to `entity`.
    #[must_use]
    pub fn entity_component(&self, entity: Entity, type_id: ComponentTypeId) -> Option<InstanceId> {
        self.entities.components(entity)?.iter().copied().find(|&id| {
            self.components
                .header(id)
                .is_some_and(|header| header.type_id == type_id)
        })
    }

    /// Live entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter()
    }

    // ── Components ────────────────────────────────────────────────

    /// Attach a new instance of `type_id` to `entity`.
    ///
    /// The instance starts on the next tick.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`], [`EcsError::UnknownType`] or
    /// [`EcsError::StorageExhausted`].
    pub fn attach(&mut self, entity: Entity, type_id: ComponentTypeId) -> Result<InstanceId, EcsError> {
        let instance = self.commands.allocate_instance();
        self.attach_now(entity, type_id, instance)?;
        Ok(instance)
    }

    /// Attach a new instance of the type registered as `name`.
    ///
    /// # Errors
    ///
    /// See [`World::attach`].
    pub fn attach_named(&mut self, entity: Entity, name: &str) -> Result<InstanceId, EcsError> {
        self.attach(entity, ComponentTypeId::from_name(name))
    }

    /// Run `destroy` on an instance and free it.
    ///
    /// Returns `false` if the instance is not live (e.g. already detached).
    pub fn detach(&mut self, instance: InstanceId) -> bool {
        let detached = self.detach_now(instance);
        self.flush_commands();
        detached
    }

    /// Typed shared access to a live instance.
    #[must_use]
    pub fn get<T: Component>(&self, instance: InstanceId) -> Option<&T> {
        self.components.get::<T>(instance)
    }

    /// Typed mutable access to a live instance.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self, instance: InstanceId) -> Option<&mut T> {
        self.components.get_mut::<T>(instance)
    }

    /// Entity owning a live instance.
    #[must_use]
    pub fn owner(&self, instance: InstanceId) -> Option<Entity> {
        self.components.header(instance).map(|header| header.entity)
    }

    // ── Resources ─────────────────────────────────────────────────

    /// Insert a resource, returning the previous value of that type.
    pub fn insert_resource<T: 'static>(&mut self, value: T) -> Option<T> {
        self.resources.insert(value)
    }

    #[must_use]
    pub fn resource<T: 'static>(&self) -> Option<&T> {
        self.resources.get::<T>()
    }

    #[must_use]
    pub fn resource_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.resources.get_mut::<T>()
    }

    #[must_use]
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    /// The deferred command queue. Queued commands are applied by the next
    /// [`World::flush_commands`] or at the end of the next tick.
    pub fn commands(&mut self) -> &mut Commands {
        &mut self.commands
    }

    // ── Lifecycle ─────────────────────────────────────────────────

    /// Run one tick: dispatch every system, then apply queued commands.
    pub fn tick(&mut self) -> DispatchStats {
        if self.shut_down {
            warn!(tick = self.tick, "tick after shutdown ignored");
            return DispatchStats::default();
        }
        self.tick += 1;
        let stats = scheduler::dispatch(
            &mut self.systems,
            &mut self.components,
            &mut self.resources,
            &mut self.commands,
            &self.entities,
            self.tick,
        );
        let applied = self.flush_commands();
        if applied > 0 {
            debug!(tick = self.tick, applied, "deferred commands applied");
        }
        stats
    }

    /// Number of completed ticks.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Apply every queued command in FIFO order, including commands queued
    /// while applying. Returns how many were applied.
    pub fn flush_commands(&mut self) -> usize {
        let mut applied = 0;
        while let Some(command) = self.commands.pop() {
            self.apply(command);
            applied += 1;
        }
        applied
    }

    /// Register a hook to run at [`World::shutdown`]. Hooks run in reverse
    /// registration order, before any entity is destroyed.
    pub fn add_shutdown_hook(&mut self, hook: impl FnOnce(&mut World) + 'static) {
        self.shutdown_hooks.push(Box::new(hook));
    }

    /// Tear the world down: run shutdown hooks, destroy every entity, then
    /// call every system driver's `destroy`. Idempotent.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        info!(
            tick = self.tick,
            entities = self.entities.len(),
            instances = self.components.len(),
            "world shutting down"
        );

        let hooks = mem::take(&mut self.shutdown_hooks);
        for hook in hooks.into_iter().rev() {
            hook(self);
        }
        self.flush_commands();
        self.shut_down = true;

        let all: Vec<Entity> = self.entities.iter().collect();
        for entity in all {
            self.destroy_entity_now(entity);
        }
        let dropped = self.commands.len();
        while self.commands.pop().is_some() {}
        if dropped > 0 {
            debug!(dropped, "commands queued during shutdown dropped");
        }

        for entry in self.systems.iter_mut() {
            if let Err(err) = entry.driver.destroy(&mut self.resources) {
                error!(system = %entry.name, error = format!("{err:#}"), "system destroy failed");
            }
        }
    }

    /// Returns `true` once [`World::shutdown`] has run.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    // ── Counts ────────────────────────────────────────────────────

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn type_count(&self) -> usize {
        self.components.type_count()
    }

    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.system_count()
    }

    // ── Internals ─────────────────────────────────────────────────

    fn apply(&mut self, command: Command) {
        match command {
            Command::Spawn { entity, name } => {
                if let Err(err) = self.entities.insert(entity, name.as_deref()) {
                    warn!(entity = %entity, error = %err, "deferred spawn failed");
                }
            }
            Command::Attach {
                entity,
                type_id,
                instance,
            } => {
                if let Err(err) = self.attach_now(entity, type_id, instance) {
                    warn!(entity = %entity, instance = %instance, error = %err, "deferred attach failed");
                }
            }
            Command::Detach(instance) => {
                self.detach_now(instance);
            }
            Command::Despawn(entity) => {
                self.destroy_entity_now(entity);
            }
        }
    }

    fn attach_now(
        &mut self,
        entity: Entity,
        type_id: ComponentTypeId,
        instance: InstanceId,
    ) -> Result<(), EcsError> {
        if !self.entities.contains(entity) {
            return Err(EcsError::UnknownEntity(entity));
        }
        let system = self
            .components
            .type_info(type_id)
            .ok_or(EcsError::UnknownType(type_id))?
            .system;

        self.components.insert(instance, entity, type_id)?;
        if let Err(err) = self
            .entities
            .link(entity, instance)
            .and_then(|()| self.systems.add_member(system, instance))
        {
            self.entities.unlink(entity, instance);
            self.components.remove(instance);
            return Err(err);
        }
        debug!(entity = %entity, instance = %instance, type_id = %type_id, "component attached");
        Ok(())
    }

    fn detach_now(&mut self, instance: InstanceId) -> bool {
        let Some(header) = self.components.header(instance) else {
            debug!(instance = %instance, "detach of dead instance ignored");
            return false;
        };

        let mut services = Services::new(
            &mut self.resources,
            &mut self.commands,
            &self.entities,
            self.tick,
        );
        if let Some(Err(err)) = self.components.invoke(instance, Phase::Destroy, &mut services) {
            error!(instance = %instance, error = format!("{err:#}"), "component destroy failed");
        }

        self.components.remove(instance);
        self.entities.unlink(header.entity, instance);
        if let Some(info) = self.components.type_info(header.type_id) {
            let system = info.system;
            self.systems.remove_member(system, instance);
        }
        debug!(instance = %instance, entity = %header.entity, "component detached");
        true
    }

    fn destroy_entity_now(&mut self, entity: Entity) -> bool {
        let Some(attached) = self.entities.components(entity).map(<[InstanceId]>::to_vec) else {
            debug!(entity = %entity, "destroy of dead entity ignored");
            return false;
        };
        for instance in attached {
            self.detach_now(instance);
        }
        self.entities.remove(entity);
        debug!(entity = %entity, "entity destroyed");
        true
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("tick", &self.tick)
            .field("entities", &self.entities.len())
            .field("instances", &self.components.len())
            .field("types", &self.components.type_count())
            .field("systems", &self.systems.system_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use engine_component::Context;
    use engine_system::Traversal;

    use super::*;

    /// Shared event log installed as a resource.
    #[derive(Default)]
    struct Events(Vec<String>);

    fn push(cx: &mut Context<'_>, event: String) {
        if let Some(events) = cx.resource_mut::<Events>() {
            events.0.push(event);
        }
    }

    #[derive(Debug, Clone, Default)]
    struct Tracked {
        label: &'static str,
    }

    impl Component for Tracked {
        fn start(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
            push(cx, format!("start:{}:{}", self.label, cx.tick()));
            Ok(())
        }

        fn update(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
            push(cx, format!("update:{}:{}", self.label, cx.tick()));
            Ok(())
        }

        fn destroy(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
            push(cx, format!("destroy:{}", self.label));
            Ok(())
        }
    }

    /// Attaches a `tracked` component to its own entity on its first update.
    #[derive(Debug, Clone, Default)]
    struct Spawner {
        done: bool,
    }

    impl Component for Spawner {
        fn update(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
            if !self.done {
                self.done = true;
                let entity = cx.entity();
                cx.commands().attach_named(entity, "late");
            }
            Ok(())
        }
    }

    fn events(world: &World) -> Vec<String> {
        world.resource::<Events>().map(|e| e.0.clone()).unwrap_or_default()
    }

    fn world() -> World {
        let mut world = World::new();
        world.insert_resource(Events::default());
        world
    }

    #[test]
    fn test_builtin_system_is_registered() {
        let world = World::new();
        assert_eq!(world.system_count(), 1);
        assert_eq!(world.system(world.builtin_system()).unwrap().name(), BUILTIN_SYSTEM);
    }

    #[test]
    fn test_live_count_tracks_attach_and_detach() {
        let mut world = world();
        let ty = world.construct_type("a", Tracked { label: "a" }).unwrap();
        let e = world.new_entity(None).unwrap();

        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(world.attach(e, ty).unwrap());
        }
        assert!(world.detach(ids[1]));
        assert!(world.detach(ids[3]));
        assert!(!world.detach(ids[3]));
        assert_eq!(world.instance_count(), 3);

        let fresh = world.attach(e, ty).unwrap();
        assert!(!ids.contains(&fresh));
    }

    #[test]
    fn test_destroy_entity_runs_destroy_in_attachment_order() {
        let mut world = world();
        let a = world.construct_type("a", Tracked { label: "a" }).unwrap();
        let b = world.construct_type("b", Tracked { label: "b" }).unwrap();
        let e = world.new_entity(Some("victim")).unwrap();
        world.attach(e, b).unwrap();
        world.attach(e, a).unwrap();
        world.attach(e, b).unwrap();

        assert!(world.destroy_entity(e));
        assert_eq!(events(&world), ["destroy:b", "destroy:a", "destroy:b"]);
        assert!(!world.contains_entity(e));
        assert_eq!(world.instance_count(), 0);
        assert!(!world.destroy_entity(e));
    }

    #[test]
    fn test_component_starts_on_next_tick() {
        let mut world = world();
        world.construct_type("spawner", Spawner::default()).unwrap();
        world.construct_type("late", Tracked { label: "late" }).unwrap();
        let e = world.new_entity(None).unwrap();
        world.attach_named(e, "spawner").unwrap();

        // Tick 1: spawner queues the attach; it is applied after dispatch.
        world.tick();
        assert_eq!(world.entity_components(e).unwrap().len(), 2);
        assert!(events(&world).is_empty());

        // Tick 2: the late component starts, then updates.
        world.tick();
        assert_eq!(events(&world), ["start:late:2", "update:late:2"]);
    }

    #[test]
    fn test_detach_before_tick_cancels_start() {
        let mut world = world();
        let ty = world.construct_type("a", Tracked { label: "a" }).unwrap();
        let e = world.new_entity(None).unwrap();
        let id = world.attach(e, ty).unwrap();
        world.detach(id);
        world.tick();
        assert_eq!(events(&world), ["destroy:a"]);
    }

    #[test]
    fn test_attach_failures() {
        let mut world = world();
        let ty = world.construct_type("a", Tracked::default()).unwrap();
        assert!(matches!(
            world.attach(Entity(999), ty),
            Err(EcsError::UnknownEntity(_))
        ));
        let e = world.new_entity(None).unwrap();
        assert!(matches!(
            world.attach_named(e, "missing"),
            Err(EcsError::UnknownType(_))
        ));
        assert_eq!(world.instance_count(), 0);
    }

    #[test]
    fn test_duplicate_type_name_fails_second_only() {
        let mut world = world();
        let first = world.construct_type("dup", Tracked { label: "first" }).unwrap();
        assert!(world.construct_type("dup", Spawner::default()).is_err());

        let e = world.new_entity(None).unwrap();
        let id = world.attach(e, first).unwrap();
        assert_eq!(world.get::<Tracked>(id).unwrap().label, "first");
    }

    #[test]
    fn test_find_copy_and_entity_component() {
        let mut world = world();
        let a = world.construct_type("a", Tracked { label: "a" }).unwrap();
        let b = world.construct_type("b", Tracked { label: "b" }).unwrap();
        let first = world.new_entity(Some("Bob")).unwrap();
        world.new_entity(Some("Bob")).unwrap();
        world.attach(first, a).unwrap();
        let b_id = world.attach(first, b).unwrap();

        assert_eq!(world.find_entity("Bob"), Some(first));
        assert_eq!(world.find_entity("Alice"), None);
        assert_eq!(world.entity_component(first, b), Some(b_id));

        let copy = world.copy_entity(first, Some("Bob copy")).unwrap();
        let copied = world.entity_components(copy).unwrap();
        assert_eq!(copied.len(), 2);
        assert_eq!(world.type_info(a).map(|t| t.name.as_str()), Some("a"));
        assert!(world.entity_component(copy, a).is_some());
        assert_ne!(world.entity_component(copy, b), Some(b_id));
        assert_eq!(world.entity_name(copy), Some("Bob copy"));
    }

    #[test]
    fn test_custom_system_owns_its_types() {
        struct Twice;

        impl System for Twice {
            fn update(&mut self, traversal: &mut Traversal<'_>) -> anyhow::Result<()> {
                traversal.update_all();
                traversal.update_all();
                Ok(())
            }
        }

        let mut world = world();
        let sys = world.construct_system(SystemConfig::new("twice"), Twice).unwrap();
        let ty = world
            .construct_type_for("a", Tracked { label: "a" }, sys)
            .unwrap();
        let e = world.new_entity(None).unwrap();
        let id = world.attach(e, ty).unwrap();

        assert_eq!(world.system(sys).unwrap().members(), [id]);
        world.tick();
        assert_eq!(events(&world), ["start:a:1", "update:a:1", "update:a:1"]);

        assert!(matches!(
            world.construct_type_for("b", Tracked::default(), SystemId::from_name("nope")),
            Err(EcsError::UnknownSystem(_))
        ));
    }

    #[test]
    fn test_shutdown_runs_hooks_then_destroys() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut world = world();
        let ty = world.construct_type("a", Tracked { label: "a" }).unwrap();
        let e = world.new_entity(None).unwrap();
        world.attach(e, ty).unwrap();

        for label in ["first", "second"] {
            let order = order.clone();
            world.add_shutdown_hook(move |w| {
                order.borrow_mut().push(format!("{label}:{}", w.entity_count()));
            });
        }

        world.shutdown();
        world.shutdown();
        assert_eq!(*order.borrow(), ["second:1", "first:1"]);
        assert_eq!(events(&world), ["destroy:a"]);
        assert_eq!(world.entity_count(), 0);
        assert!(world.is_shut_down());
        assert_eq!(world.tick().systems, 0);
    }

    #[test]
    fn test_entity_capacity() {
        let mut world = World::with_config(&EcsConfig {
            max_entities: 1,
            ..EcsConfig::default()
        });
        world.new_entity(None).unwrap();
        assert!(matches!(
            world.new_entity(None),
            Err(EcsError::EntityTableFull { capacity: 1 })
        ));
    }
}
