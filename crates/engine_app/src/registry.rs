//! System registry: registered systems in registration order.
//!
//! Each entry owns the system's driver object, its traversal list (instance
//! ids in attachment order) and the queue of instances waiting for their
//! first `start`.

use std::collections::HashMap;

use engine_component::{EcsError, InstanceId, SystemId};
use engine_system::{System, SystemConfig};

/// One registered system.
pub struct SystemEntry {
    pub(crate) id: SystemId,
    pub(crate) name: String,
    pub(crate) state_size: usize,
    pub(crate) driver: Box<dyn System>,
    pub(crate) members: Vec<InstanceId>,
    pub(crate) pending_start: Vec<InstanceId>,
}

impl SystemEntry {
    #[must_use]
    pub fn id(&self) -> SystemId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes of the driver object.
    #[must_use]
    pub fn state_size(&self) -> usize {
        self.state_size
    }

    /// Instance ids in traversal order.
    #[must_use]
    pub fn members(&self) -> &[InstanceId] {
        &self.members
    }

    /// Instance ids that start on the next tick.
    #[must_use]
    pub fn pending_start(&self) -> &[InstanceId] {
        &self.pending_start
    }
}

impl std::fmt::Debug for SystemEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("state_size", &self.state_size)
            .field("members", &self.members.len())
            .field("pending_start", &self.pending_start.len())
            .finish()
    }
}

/// Registry of all systems known to the world.
#[derive(Debug)]
pub struct SystemRegistry {
    /// Systems in registration order.
    entries: Vec<SystemEntry>,
    /// Position of each system in `entries`.
    index: HashMap<SystemId, usize>,
    capacity: usize,
}

impl SystemRegistry {
    /// Create a new empty registry holding at most `capacity` systems.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            capacity,
        }
    }

    /// Register a system driver under `config.name`.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidName`], [`EcsError::NameCollision`] or
    /// [`EcsError::SystemTableFull`].
    pub fn register(
        &mut self,
        config: SystemConfig,
        driver: Box<dyn System>,
        state_size: usize,
    ) -> Result<SystemId, EcsError> {
        if config.name.is_empty() {
            return Err(EcsError::InvalidName);
        }
        let id = config.id();
        if self.index.contains_key(&id) || !id.is_valid() {
            return Err(EcsError::NameCollision(config.name));
        }
        if self.entries.len() >= self.capacity {
            return Err(EcsError::SystemTableFull {
                capacity: self.capacity,
            });
        }

        self.index.insert(id, self.entries.len());
        self.entries.push(SystemEntry {
            id,
            name: config.name,
            state_size,
            driver,
            members: Vec::new(),
            pending_start: Vec::new(),
        });
        Ok(id)
    }

    /// Returns a system by id.
    #[must_use]
    pub fn get(&self, id: SystemId) -> Option<&SystemEntry> {
        self.index.get(&id).map(|&i| &self.entries[i])
    }

    /// Returns `true` if the system is registered.
    #[must_use]
    pub fn contains(&self, id: SystemId) -> bool {
        self.index.contains_key(&id)
    }

    /// Append an instance to a system's traversal list and queue its start.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownSystem`] if the system is not registered.
    pub fn add_member(&mut self, id: SystemId, instance: InstanceId) -> Result<(), EcsError> {
        let &i = self.index.get(&id).ok_or(EcsError::UnknownSystem(id))?;
        let entry = &mut self.entries[i];
        entry.members.push(instance);
        entry.pending_start.push(instance);
        Ok(())
    }

    /// Remove an instance from a system's traversal list and pending queue.
    ///
    /// Returns `true` if it was a member.
    pub fn remove_member(&mut self, id: SystemId, instance: InstanceId) -> bool {
        let Some(&i) = self.index.get(&id) else {
            return false;
        };
        let entry = &mut self.entries[i];
        entry.pending_start.retain(|&p| p != instance);
        match entry.members.iter().position(|&m| m == instance) {
            Some(pos) => {
                entry.members.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Returns an iterator over all systems in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SystemEntry> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut SystemEntry> {
        self.entries.iter_mut()
    }

    /// Returns the number of registered systems.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.entries.len()
    }
}
