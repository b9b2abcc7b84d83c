//! Entity type and the entity registry.
//!
//! An [`Entity`] is a lightweight `u64` identifier. The [`EntityRegistry`]
//! keeps one [`EntityRecord`] per live entity: its optional name and the
//! ordered list of component instances attached to it. The list is structural
//! only; the instances themselves live in the
//! [`ComponentRegistry`](crate::ComponentRegistry).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EcsError;
use crate::id::InstanceId;

/// A unique entity identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity(pub u64);

impl Entity {
    /// The null / invalid entity sentinel.
    pub const INVALID: Entity = Entity(0);

    /// Create an entity from a raw `u64` identifier.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is a valid (non-zero) entity.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Bookkeeping for one live entity.
#[derive(Debug, Clone)]
pub struct EntityRecord {
    /// The entity's id.
    pub id: Entity,
    /// Optional, not necessarily unique, name.
    pub name: Option<String>,
    /// Attached instances in attachment order.
    pub components: Vec<InstanceId>,
}

/// Owns every live entity record.
#[derive(Debug)]
pub struct EntityRegistry {
    records: HashMap<Entity, EntityRecord>,
    /// Creation order, used for deterministic name lookup and iteration.
    order: Vec<Entity>,
    capacity: usize,
}

impl EntityRegistry {
    /// Creates an empty registry that holds at most `capacity` entities.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
            capacity,
        }
    }

    /// Insert a record for a freshly allocated entity id.
    ///
    /// # Errors
    ///
    /// [`EcsError::EntityTableFull`] at capacity, [`EcsError::UnknownEntity`]
    /// when `entity` is the sentinel or already live.
    pub fn insert(&mut self, entity: Entity, name: Option<&str>) -> Result<(), EcsError> {
        if self.records.len() >= self.capacity {
            return Err(EcsError::EntityTableFull {
                capacity: self.capacity,
            });
        }
        if !entity.is_valid() || self.records.contains_key(&entity) {
            return Err(EcsError::UnknownEntity(entity));
        }
        self.records.insert(
            entity,
            EntityRecord {
                id: entity,
                name: name.map(str::to_owned),
                components: Vec::new(),
            },
        );
        self.order.push(entity);
        Ok(())
    }

    /// Remove an entity record. Callers detach its components first.
    pub fn remove(&mut self, entity: Entity) -> Option<EntityRecord> {
        let record = self.records.remove(&entity)?;
        if let Some(pos) = self.order.iter().position(|&e| e == entity) {
            self.order.remove(pos);
        }
        Some(record)
    }

    /// Returns `true` if the entity is live.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.records.contains_key(&entity)
    }

    /// Returns the record of a live entity.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&EntityRecord> {
        self.records.get(&entity)
    }

    /// Returns the name of a live entity, if it has one.
    #[must_use]
    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.records.get(&entity)?.name.as_deref()
    }

    /// Returns the attached instances of a live entity in attachment order.
    #[must_use]
    pub fn components(&self, entity: Entity) -> Option<&[InstanceId]> {
        self.records.get(&entity).map(|r| r.components.as_slice())
    }

    /// First entity, in creation order, carrying `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Entity> {
        self.order
            .iter()
            .copied()
            .find(|e| self.name(*e) == Some(name))
    }

    /// Append an instance to an entity's component list.
    pub fn link(&mut self, entity: Entity, instance: InstanceId) -> Result<(), EcsError> {
        let record = self
            .records
            .get_mut(&entity)
            .ok_or(EcsError::UnknownEntity(entity))?;
        record.components.push(instance);
        Ok(())
    }

    /// Remove an instance from an entity's component list.
    ///
    /// Returns `true` if the instance was listed.
    pub fn unlink(&mut self, entity: Entity, instance: InstanceId) -> bool {
        let Some(record) = self.records.get_mut(&entity) else {
            return false;
        };
        match record.components.iter().position(|&id| id == instance) {
            Some(pos) => {
                record.components.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Live entities in creation order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no entity is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_creation() {
        let e = Entity::from_raw(42);
        assert_eq!(e.id(), 42);
        assert!(e.is_valid());
        assert!(!Entity::INVALID.is_valid());
    }

    #[test]
    fn test_insert_and_find_by_name() {
        let mut registry = EntityRegistry::new(8);
        registry.insert(Entity(1), Some("Bob")).unwrap();
        registry.insert(Entity(2), None).unwrap();
        registry.insert(Entity(3), Some("Bob")).unwrap();

        assert_eq!(registry.len(), 3);
        // Names are not unique; the oldest wins.
        assert_eq!(registry.find("Bob"), Some(Entity(1)));
        assert_eq!(registry.find("Alice"), None);
        assert_eq!(registry.name(Entity(2)), None);
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut registry = EntityRegistry::new(1);
        registry.insert(Entity(1), None).unwrap();
        assert!(matches!(
            registry.insert(Entity(2), None),
            Err(EcsError::EntityTableFull { capacity: 1 })
        ));
    }

    #[test]
    fn test_sentinel_and_duplicates_are_rejected() {
        let mut registry = EntityRegistry::new(4);
        assert!(registry.insert(Entity::INVALID, None).is_err());
        registry.insert(Entity(5), None).unwrap();
        assert!(registry.insert(Entity(5), None).is_err());
    }

    #[test]
    fn test_link_and_unlink_preserve_order() {
        let mut registry = EntityRegistry::new(4);
        registry.insert(Entity(1), None).unwrap();
        for raw in [10, 11, 12] {
            registry.link(Entity(1), InstanceId(raw)).unwrap();
        }
        assert!(registry.unlink(Entity(1), InstanceId(11)));
        assert!(!registry.unlink(Entity(1), InstanceId(11)));
        assert_eq!(
            registry.components(Entity(1)).unwrap(),
            &[InstanceId(10), InstanceId(12)]
        );
    }

    #[test]
    fn test_link_to_dead_entity_fails() {
        let mut registry = EntityRegistry::new(4);
        assert!(matches!(
            registry.link(Entity(9), InstanceId(1)),
            Err(EcsError::UnknownEntity(Entity(9)))
        ));
    }

    #[test]
    fn test_remove() {
        let mut registry = EntityRegistry::new(4);
        registry.insert(Entity(1), Some("a")).unwrap();
        assert!(registry.remove(Entity(1)).is_some());
        assert!(registry.remove(Entity(1)).is_none());
        assert!(registry.is_empty());
        assert_eq!(registry.find("a"), None);
    }
}
