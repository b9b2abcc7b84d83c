//! The component registry.
//!
//! Owns every component type descriptor and every component instance. Types
//! are keyed by the FNV-1a hash of their name; instances by their
//! [`InstanceId`], which maps to a `(type, slot)` location in the type's pool.
//!
//! The registry knows nothing about entities or systems beyond the ids stored
//! in headers and descriptors. Linking instances into entity and system lists
//! is the caller's job (see `engine_app::World`).

use std::collections::HashMap;

use tracing::debug;

use crate::component::{Component, ComponentHeader, ComponentType, ComponentTypeId, Phase};
use crate::context::Services;
use crate::entity::Entity;
use crate::error::EcsError;
use crate::id::{InstanceId, SystemId};
use crate::pool::{ErasedPool, Pool};

struct TypeEntry {
    info: ComponentType,
    pool: Box<dyn ErasedPool>,
}

/// Owns component types and their instances.
pub struct ComponentRegistry {
    types: HashMap<ComponentTypeId, TypeEntry>,
    /// Registration order of the types.
    order: Vec<ComponentTypeId>,
    /// Where each live instance is stored.
    locations: HashMap<InstanceId, (ComponentTypeId, u32)>,
    max_types: usize,
    max_instances: usize,
}

impl ComponentRegistry {
    /// Create an empty registry with the given capacities.
    #[must_use]
    pub fn new(max_types: usize, max_instances: usize) -> Self {
        Self {
            types: HashMap::new(),
            order: Vec::new(),
            locations: HashMap::new(),
            max_types,
            max_instances,
        }
    }

    /// Register a new component type.
    ///
    /// `prototype` is cloned into every instance attached later. The new type
    /// feeds its instances to `system`.
    ///
    /// # Errors
    ///
    /// - [`EcsError::InvalidName`] for an empty name.
    /// - [`EcsError::TypeTableFull`] when the type capacity is reached.
    /// - [`EcsError::NameCollision`] when the name is already registered; the
    ///   existing type is left untouched.
    pub fn construct_type<T: Component + Clone>(
        &mut self,
        name: &str,
        prototype: T,
        system: SystemId,
    ) -> Result<ComponentTypeId, EcsError> {
        if name.is_empty() {
            return Err(EcsError::InvalidName);
        }
        let id = ComponentTypeId::from_name(name);
        if self.types.contains_key(&id) || !id.is_valid() {
            return Err(EcsError::NameCollision(name.to_string()));
        }
        if self.types.len() >= self.max_types {
            return Err(EcsError::TypeTableFull {
                capacity: self.max_types,
            });
        }

        let info = ComponentType {
            id,
            name: name.to_string(),
            instance_size: Pool::<T>::instance_size(),
            system,
        };
        debug!(
            type_id = %id,
            name,
            instance_size = info.instance_size,
            system = %system,
            "component type constructed"
        );
        self.types.insert(
            id,
            TypeEntry {
                info,
                pool: Box::new(Pool::new(prototype)),
            },
        );
        self.order.push(id);
        Ok(id)
    }

    /// Returns the descriptor of a registered type.
    #[must_use]
    pub fn type_info(&self, id: ComponentTypeId) -> Option<&ComponentType> {
        self.types.get(&id).map(|t| &t.info)
    }

    /// Returns the descriptor of the type registered as `name`.
    #[must_use]
    pub fn type_by_name(&self, name: &str) -> Option<&ComponentType> {
        self.type_info(ComponentTypeId::from_name(name))
    }

    /// Registered types in registration order.
    pub fn types(&self) -> impl Iterator<Item = &ComponentType> + '_ {
        self.order.iter().filter_map(|id| self.type_info(*id))
    }

    /// Store a new instance of `type_id` under the pre-allocated `id`.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownType`], [`EcsError::StorageExhausted`] or
    /// [`EcsError::DuplicateInstance`].
    pub fn insert(
        &mut self,
        id: InstanceId,
        entity: Entity,
        type_id: ComponentTypeId,
    ) -> Result<ComponentHeader, EcsError> {
        if self.locations.len() >= self.max_instances {
            return Err(EcsError::StorageExhausted {
                capacity: self.max_instances,
            });
        }
        if !id.is_valid() || self.locations.contains_key(&id) {
            return Err(EcsError::DuplicateInstance(id));
        }
        let entry = self
            .types
            .get_mut(&type_id)
            .ok_or(EcsError::UnknownType(type_id))?;

        let header = ComponentHeader {
            id,
            type_id,
            entity,
        };
        let slot = entry.pool.insert(header);
        self.locations.insert(id, (type_id, slot));
        Ok(header)
    }

    /// Free an instance's slot without running any callback.
    ///
    /// Returns the header it held, or `None` if the id is not live.
    pub fn remove(&mut self, id: InstanceId) -> Option<ComponentHeader> {
        let (type_id, slot) = self.locations.remove(&id)?;
        self.types.get_mut(&type_id)?.pool.remove(slot)
    }

    /// Run a lifecycle callback on a live instance.
    ///
    /// Returns `None` if the id is not live.
    pub fn invoke(
        &mut self,
        id: InstanceId,
        phase: Phase,
        services: &mut Services<'_>,
    ) -> Option<anyhow::Result<()>> {
        let (type_id, slot) = *self.locations.get(&id)?;
        self.types
            .get_mut(&type_id)?
            .pool
            .invoke(slot, phase, services)
    }

    /// Header of a live instance.
    #[must_use]
    pub fn header(&self, id: InstanceId) -> Option<ComponentHeader> {
        let (type_id, slot) = *self.locations.get(&id)?;
        self.types.get(&type_id)?.pool.header(slot)
    }

    /// Returns `true` if the instance is live.
    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.locations.contains_key(&id)
    }

    /// Typed shared access to a live instance.
    #[must_use]
    pub fn get<T: Component>(&self, id: InstanceId) -> Option<&T> {
        let (type_id, slot) = *self.locations.get(&id)?;
        self.types
            .get(&type_id)?
            .pool
            .get_any(slot)?
            .downcast_ref::<T>()
    }

    /// Typed mutable access to a live instance.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self, id: InstanceId) -> Option<&mut T> {
        let (type_id, slot) = *self.locations.get(&id)?;
        self.types
            .get_mut(&type_id)?
            .pool
            .get_any_mut(slot)?
            .downcast_mut::<T>()
    }

    /// Number of live instances of one type.
    #[must_use]
    pub fn live_of(&self, type_id: ComponentTypeId) -> usize {
        self.types.get(&type_id).map_or(0, |t| t.pool.live())
    }

    /// Total number of live instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if no instance is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of registered types.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("types", &self.types.len())
            .field("instances", &self.locations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Commands;
    use crate::context::Context;
    use crate::entity::EntityRegistry;
    use crate::resource::Resources;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Health {
        current: f32,
        max: f32,
    }

    impl Component for Health {}

    #[derive(Debug, Clone, Default)]
    struct Fails;

    impl Component for Fails {
        fn update(&mut self, _cx: &mut Context<'_>) -> anyhow::Result<()> {
            anyhow::bail!("boom")
        }
    }

    fn registry() -> ComponentRegistry {
        ComponentRegistry::new(8, 16)
    }

    #[test]
    fn test_construct_type_records_descriptor() {
        let mut reg = registry();
        let id = reg
            .construct_type("health", Health::default(), SystemId(9))
            .unwrap();
        let info = reg.type_info(id).unwrap();
        assert_eq!(info.name, "health");
        assert_eq!(info.system, SystemId(9));
        assert!(info.instance_size >= std::mem::size_of::<Health>());
        assert_eq!(reg.type_by_name("health").map(|t| t.id), Some(id));
    }

    #[test]
    fn test_duplicate_name_fails_and_keeps_first() {
        let mut reg = registry();
        let first = reg
            .construct_type("health", Health { current: 1.0, max: 1.0 }, SystemId(1))
            .unwrap();
        let second = reg.construct_type("health", Fails, SystemId(2));
        assert!(matches!(second, Err(EcsError::NameCollision(ref n)) if n == "health"));

        // The first registration is unaffected.
        assert_eq!(reg.type_count(), 1);
        assert_eq!(reg.type_info(first).unwrap().system, SystemId(1));
        let header = reg.insert(InstanceId(1), Entity(1), first).unwrap();
        assert_eq!(
            reg.get::<Health>(header.id),
            Some(&Health { current: 1.0, max: 1.0 })
        );
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut reg = registry();
        assert!(matches!(
            reg.construct_type("", Health::default(), SystemId(1)),
            Err(EcsError::InvalidName)
        ));
    }

    #[test]
    fn test_type_table_full() {
        let mut reg = ComponentRegistry::new(1, 4);
        reg.construct_type("a", Health::default(), SystemId(1)).unwrap();
        assert!(matches!(
            reg.construct_type("b", Health::default(), SystemId(1)),
            Err(EcsError::TypeTableFull { capacity: 1 })
        ));
    }

    #[test]
    fn test_insert_remove_counts() {
        let mut reg = registry();
        let ty = reg.construct_type("health", Health::default(), SystemId(1)).unwrap();
        for raw in 1..=5 {
            reg.insert(InstanceId(raw), Entity(1), ty).unwrap();
        }
        assert!(reg.remove(InstanceId(2)).is_some());
        assert!(reg.remove(InstanceId(2)).is_none());
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.live_of(ty), 4);
        assert!(!reg.contains(InstanceId(2)));
    }

    #[test]
    fn test_insert_failures() {
        let mut reg = ComponentRegistry::new(4, 1);
        let ty = reg.construct_type("health", Health::default(), SystemId(1)).unwrap();

        assert!(matches!(
            reg.insert(InstanceId(1), Entity(1), ComponentTypeId::from_name("nope")),
            Err(EcsError::UnknownType(_))
        ));
        reg.insert(InstanceId(1), Entity(1), ty).unwrap();
        assert!(matches!(
            reg.insert(InstanceId(2), Entity(1), ty),
            Err(EcsError::StorageExhausted { capacity: 1 })
        ));
    }

    #[test]
    fn test_typed_access_checks_type() {
        let mut reg = registry();
        let ty = reg.construct_type("health", Health::default(), SystemId(1)).unwrap();
        reg.insert(InstanceId(1), Entity(1), ty).unwrap();

        reg.get_mut::<Health>(InstanceId(1)).unwrap().current = 50.0;
        assert_eq!(reg.get::<Health>(InstanceId(1)).unwrap().current, 50.0);
        assert!(reg.get::<Fails>(InstanceId(1)).is_none());
        assert!(reg.get::<Health>(InstanceId(99)).is_none());
    }

    #[test]
    fn test_invoke_surfaces_callback_errors() {
        let mut reg = registry();
        let ty = reg.construct_type("fails", Fails, SystemId(1)).unwrap();
        reg.insert(InstanceId(1), Entity(1), ty).unwrap();

        let mut resources = Resources::new();
        let mut commands = Commands::new();
        let entities = EntityRegistry::new(1);
        let mut services = Services::new(&mut resources, &mut commands, &entities, 0);

        let result = reg.invoke(InstanceId(1), Phase::Update, &mut services).unwrap();
        assert_eq!(result.unwrap_err().to_string(), "boom");
        assert!(reg.invoke(InstanceId(1), Phase::Start, &mut services).unwrap().is_ok());
        assert!(reg.invoke(InstanceId(2), Phase::Update, &mut services).is_none());
    }

    #[test]
    fn test_types_iterate_in_registration_order() {
        let mut reg = registry();
        reg.construct_type("b", Health::default(), SystemId(1)).unwrap();
        reg.construct_type("a", Health::default(), SystemId(1)).unwrap();
        let names: Vec<_> = reg.types().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
