//! Fixed-capacity entity pools
//!
//! Every entity kind lives in a pool allocated once at startup. Spawning
//! activates an inactive slot; death only flips it back. Slots never move,
//! so indices (and the generational handles built on them) stay valid for
//! the lifetime of the run.

use serde::{Deserialize, Serialize};

/// Lifecycle contract every pooled entity implements. `Default` must yield
/// an inactive slot.
pub trait Pooled: Default {
    fn is_active(&self) -> bool;
    fn deactivate(&mut self);
}

/// Generational reference into a pool. A handle taken before a slot was
/// recycled stops resolving once the slot is reused, so a stale
/// back-reference can never silently read the wrong entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handle {
    index: u32,
    generation: u32,
}

/// Fixed-capacity recyclable storage for one entity kind.
#[derive(Debug, Clone)]
pub struct EntityPool<T: Pooled> {
    slots: Vec<T>,
    generations: Vec<u32>,
}

impl<T: Pooled> EntityPool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| T::default()).collect(),
            generations: vec![0; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    /// First inactive slot, reset to default with a fresh generation, or
    /// `None` when the pool is exhausted. Exhaustion is a soft degrade:
    /// callers simply drop the spawn.
    pub fn acquire(&mut self) -> Option<(Handle, &mut T)> {
        let index = self.slots.iter().position(|s| !s.is_active())?;
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.slots[index] = T::default();
        let handle = Handle {
            index: index as u32,
            generation: self.generations[index],
        };
        Some((handle, &mut self.slots[index]))
    }

    /// Resolve a handle; fails for inactive slots and for handles that
    /// predate the slot's most recent recycle.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.is_active() && self.generations[handle.index as usize] == handle.generation {
            Some(slot)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.is_active() && self.generations[handle.index as usize] == handle.generation {
            Some(slot)
        } else {
            None
        }
    }

    /// Active slots in stable index order.
    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|s| s.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter(|s| s.is_active())
    }

    /// All slots, active or not. Needed by passes that want index stability
    /// across the whole pool.
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.slots
    }

    /// Deactivate every slot (run restart).
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.deactivate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Dummy {
        active: bool,
        value: u32,
    }

    impl Pooled for Dummy {
        fn is_active(&self) -> bool {
            self.active
        }
        fn deactivate(&mut self) {
            self.active = false;
        }
    }

    #[test]
    fn test_acquire_respects_capacity() {
        let mut pool: EntityPool<Dummy> = EntityPool::with_capacity(3);
        for _ in 0..3 {
            let (_, slot) = pool.acquire().expect("slot available");
            slot.active = true;
        }
        assert!(pool.acquire().is_none());
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn test_freed_slot_is_reusable() {
        let mut pool: EntityPool<Dummy> = EntityPool::with_capacity(1);
        let (h, slot) = pool.acquire().unwrap();
        slot.active = true;
        pool.get_mut(h).unwrap().deactivate();
        assert!(pool.acquire().is_some());
    }

    #[test]
    fn test_stale_handle_does_not_resolve() {
        let mut pool: EntityPool<Dummy> = EntityPool::with_capacity(1);
        let (old, slot) = pool.acquire().unwrap();
        slot.active = true;
        slot.value = 7;

        // Recycle the slot: the old handle must not see the new occupant
        pool.get_mut(old).unwrap().deactivate();
        let (new, slot) = pool.acquire().unwrap();
        slot.active = true;
        slot.value = 99;

        assert!(pool.get(old).is_none());
        assert_eq!(pool.get(new).unwrap().value, 99);
    }

    #[test]
    fn test_iter_active_skips_inactive() {
        let mut pool: EntityPool<Dummy> = EntityPool::with_capacity(4);
        for i in 0..4 {
            let (_, slot) = pool.acquire().unwrap();
            slot.active = i % 2 == 0;
        }
        // acquire() reuses the inactive slots, so activate two fresh ones
        assert_eq!(pool.iter_active().count(), 2);
    }
}
