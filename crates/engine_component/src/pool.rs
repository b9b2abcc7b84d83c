//! Typed per-type instance storage.
//!
//! Each registered component type owns one [`Pool`]: a slot vector of
//! `(header, value)` pairs plus a free list. Inserting clones the type's
//! prototype into a free slot (or a new one), removing pushes the slot back on
//! the free list, so slot reuse is O(1).
//!
//! The registry holds pools behind the object-safe [`ErasedPool`] trait, keyed
//! by [`ComponentTypeId`](crate::ComponentTypeId). Typed access goes through
//! `dyn Any` downcasts, so a wrong type parameter yields `None` rather than a
//! bad cast.

use std::any::Any;

use crate::component::{Component, ComponentHeader, Phase, run_phase};
use crate::context::Services;

/// Object-safe view of a [`Pool`] used by the registry.
pub(crate) trait ErasedPool {
    /// Store a new instance initialised from the prototype. Returns its slot.
    fn insert(&mut self, header: ComponentHeader) -> u32;

    /// Free a slot, returning the header it held.
    fn remove(&mut self, slot: u32) -> Option<ComponentHeader>;

    /// Header of the instance in `slot`.
    fn header(&self, slot: u32) -> Option<ComponentHeader>;

    /// Run a lifecycle callback on the instance in `slot`.
    ///
    /// Returns `None` if the slot is empty.
    fn invoke(
        &mut self,
        slot: u32,
        phase: Phase,
        services: &mut Services<'_>,
    ) -> Option<anyhow::Result<()>>;

    fn get_any(&self, slot: u32) -> Option<&dyn Any>;

    fn get_any_mut(&mut self, slot: u32) -> Option<&mut dyn Any>;

    /// Number of occupied slots.
    fn live(&self) -> usize;
}

struct Slot<T> {
    header: ComponentHeader,
    value: T,
}

/// Slot storage for one component type.
pub(crate) struct Pool<T> {
    prototype: T,
    slots: Vec<Option<Slot<T>>>,
    free: Vec<u32>,
    live: usize,
}

impl<T: Component + Clone> Pool<T> {
    /// Create an empty pool whose instances start as copies of `prototype`.
    pub(crate) fn new(prototype: T) -> Self {
        Self {
            prototype,
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Size of one stored instance, header included.
    pub(crate) fn instance_size() -> usize {
        std::mem::size_of::<Slot<T>>()
    }
}

impl<T: Component + Clone> ErasedPool for Pool<T> {
    fn insert(&mut self, header: ComponentHeader) -> u32 {
        let slot = Slot {
            header,
            value: self.prototype.clone(),
        };
        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index as usize] = Some(slot);
                index
            }
            None => {
                self.slots.push(Some(slot));
                (self.slots.len() - 1) as u32
            }
        }
    }

    fn remove(&mut self, slot: u32) -> Option<ComponentHeader> {
        let taken = self.slots.get_mut(slot as usize)?.take()?;
        self.free.push(slot);
        self.live -= 1;
        Some(taken.header)
    }

    fn header(&self, slot: u32) -> Option<ComponentHeader> {
        self.slots
            .get(slot as usize)?
            .as_ref()
            .map(|s| s.header)
    }

    fn invoke(
        &mut self,
        slot: u32,
        phase: Phase,
        services: &mut Services<'_>,
    ) -> Option<anyhow::Result<()>> {
        let slot = self.slots.get_mut(slot as usize)?.as_mut()?;
        let mut cx = services.context(slot.header);
        Some(run_phase(&mut slot.value, phase, &mut cx))
    }

    fn get_any(&self, slot: u32) -> Option<&dyn Any> {
        self.slots
            .get(slot as usize)?
            .as_ref()
            .map(|s| &s.value as &dyn Any)
    }

    fn get_any_mut(&mut self, slot: u32) -> Option<&mut dyn Any> {
        self.slots
            .get_mut(slot as usize)?
            .as_mut()
            .map(|s| &mut s.value as &mut dyn Any)
    }

    fn live(&self) -> usize {
        self.live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Commands;
    use crate::component::ComponentTypeId;
    use crate::context::Context;
    use crate::entity::{Entity, EntityRegistry};
    use crate::id::InstanceId;
    use crate::resource::Resources;

    #[derive(Debug, Clone, PartialEq)]
    struct Charge {
        level: u32,
    }

    impl Component for Charge {
        fn update(&mut self, _cx: &mut Context<'_>) -> anyhow::Result<()> {
            self.level += 1;
            Ok(())
        }
    }

    fn header(raw: u64) -> ComponentHeader {
        ComponentHeader {
            id: InstanceId(raw),
            type_id: ComponentTypeId::from_name("charge"),
            entity: Entity(1),
        }
    }

    #[test]
    fn test_insert_clones_prototype() {
        let mut pool = Pool::new(Charge { level: 5 });
        let slot = pool.insert(header(1));
        let value = pool.get_any(slot).unwrap().downcast_ref::<Charge>().unwrap();
        assert_eq!(value, &Charge { level: 5 });
        assert_eq!(pool.live(), 1);
    }

    #[test]
    fn test_freed_slot_is_reused() {
        let mut pool = Pool::new(Charge { level: 0 });
        let a = pool.insert(header(1));
        let b = pool.insert(header(2));
        assert_eq!(pool.remove(a).map(|h| h.id), Some(InstanceId(1)));
        assert!(pool.remove(a).is_none());

        let c = pool.insert(header(3));
        assert_eq!(c, a);
        assert_ne!(c, b);
        assert_eq!(pool.header(c).map(|h| h.id), Some(InstanceId(3)));
        assert_eq!(pool.live(), 2);
    }

    #[test]
    fn test_invoke_runs_callback_on_the_slot() {
        let mut pool = Pool::new(Charge { level: 0 });
        let slot = pool.insert(header(1));

        let mut resources = Resources::new();
        let mut commands = Commands::new();
        let entities = EntityRegistry::new(1);
        let mut services = Services::new(&mut resources, &mut commands, &entities, 0);

        assert!(pool.invoke(slot, Phase::Update, &mut services).unwrap().is_ok());
        assert!(pool.invoke(slot + 1, Phase::Update, &mut services).is_none());

        let value = pool.get_any(slot).unwrap().downcast_ref::<Charge>().unwrap();
        assert_eq!(value.level, 1);
    }

    #[test]
    fn test_wrong_downcast_is_none() {
        let mut pool = Pool::new(Charge { level: 0 });
        let slot = pool.insert(header(1));
        assert!(pool.get_any(slot).unwrap().downcast_ref::<u32>().is_none());
    }
}
