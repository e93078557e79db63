//! Stable-index arena ("free list") for short-lived entities.
//!
//! Hostiles and projectiles spawn and die by the thousand per match.
//! Storing them in a plain `Vec` would force compaction (and index
//! invalidation) on every removal, so the arena instead leaves holes
//! behind and threads them into a chain that later insertions reclaim
//! in O(1). A slot index stays valid, referring to the same logical
//! entity, until `remove` is called on it; after that the slot may be
//! silently reused, so callers must never hold a `Slot` across a
//! removal boundary (in practice: never across a tick).

use serde::{Deserialize, Serialize};

/// Index of an occupied (or once-occupied) arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot(u32);

impl Slot {
    /// Raw index, for embedding in broad-phase element ids.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Rebuild a slot from a raw index previously obtained via `index`.
    /// Only meaningful within the same tick it was produced.
    pub fn from_index(idx: usize) -> Self {
        Slot(idx as u32)
    }
}

enum Entry<T> {
    Occupied(T),
    Vacant { next_free: Option<u32> },
}

/// Stable-index container with O(1) insert and remove.
pub struct Arena<T> {
    entries: Vec<Entry<T>>,
    free_head: Option<u32>,
    live: usize,
}

impl<T> Arena<T> {
    /// Create an empty arena with preallocated backing storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free_head: None,
            live: 0,
        }
    }

    /// Number of live (non-removed) elements.
    pub fn len(&self) -> usize {
        self.live
    }

    /// True when no live elements remain.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Total slot count, including vacated slots. This is the arena's
    /// high-water mark: it never shrinks short of `clear`.
    pub fn slot_count(&self) -> usize {
        self.entries.len()
    }

    /// Insert a value, reusing the head of the free chain when one
    /// exists and appending otherwise. O(1) either way.
    pub fn insert(&mut self, value: T) -> Slot {
        self.live += 1;
        match self.free_head {
            Some(idx) => {
                let next = match self.entries[idx as usize] {
                    Entry::Vacant { next_free } => next_free,
                    Entry::Occupied(_) => unreachable!("free chain points at occupied slot"),
                };
                self.free_head = next;
                self.entries[idx as usize] = Entry::Occupied(value);
                Slot(idx)
            }
            None => {
                self.entries.push(Entry::Occupied(value));
                Slot(self.entries.len() as u32 - 1)
            }
        }
    }

    /// Remove the element at `slot`, pushing the slot onto the free
    /// chain. Returns the removed value. O(1); the backing storage does
    /// not shrink.
    ///
    /// Panics if the slot is already vacant: a double remove means a
    /// stale index survived past a removal boundary, which is a
    /// programming error, not a runtime condition.
    pub fn remove(&mut self, slot: Slot) -> T {
        let entry = std::mem::replace(
            &mut self.entries[slot.index()],
            Entry::Vacant {
                next_free: self.free_head,
            },
        );
        match entry {
            Entry::Occupied(value) => {
                self.free_head = Some(slot.0);
                self.live -= 1;
                value
            }
            Entry::Vacant { .. } => panic!("arena: remove of vacant slot {}", slot.0),
        }
    }

    /// Borrow the element at `slot`, or `None` for a vacated slot.
    pub fn get(&self, slot: Slot) -> Option<&T> {
        match self.entries.get(slot.index()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Mutably borrow the element at `slot`.
    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
        match self.entries.get_mut(slot.index()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Overwrite the element at an occupied slot.
    ///
    /// Panics on a vacant slot, same reasoning as `remove`.
    pub fn set(&mut self, slot: Slot, value: T) {
        match self.entries.get_mut(slot.index()) {
            Some(entry @ Entry::Occupied(_)) => *entry = Entry::Occupied(value),
            _ => panic!("arena: set of vacant slot {}", slot.0),
        }
    }

    /// Iterate over live elements in slot order. The slot count is
    /// snapshotted when the iterator is created, so an element inserted
    /// mid-pass into a brand-new slot is not visited in the same pass.
    /// That is the intended semantics, not a bug: the tick pipeline
    /// handles freshly spawned entities on the next tick.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &T)> {
        self.entries.iter().enumerate().filter_map(|(idx, entry)| {
            match entry {
                Entry::Occupied(value) => Some((Slot(idx as u32), value)),
                Entry::Vacant { .. } => None,
            }
        })
    }

    /// Mutable variant of `iter`.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Slot, &mut T)> {
        self.entries
            .iter_mut()
            .enumerate()
            .filter_map(|(idx, entry)| match entry {
                Entry::Occupied(value) => Some((Slot(idx as u32), value)),
                Entry::Vacant { .. } => None,
            })
    }

    /// Drop all elements and reset the free chain. Keeps the backing
    /// allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_head = None;
        self.live = 0;
    }
}
