//! nexus-slotmap - Generational slot map with dense value storage.
//!
//! Maps opaque [`Handle`]s to values. Insert, lookup and erase are O(1).
//! Erased handles go stale: lookups with them return `None` instead of
//! aliasing whatever reuses the slot.
//!
//! # Layout
//!
//! ```text
//! slots:   [ gen|Occupied(dense) ][ gen|Vacant(next_free) ] ...   indexed by Handle::index
//! handles: [ Handle ][ Handle ] ...                               dense, parallel to values
//! values:  [ T      ][ T      ] ...                               dense, gap-free
//! ```
//!
//! Values are kept packed. Erase swap-removes from the dense arrays and fixes
//! up the slot of the element moved into the hole, so iteration only ever
//! touches live values. Vacant slots form an intrusive LIFO free list.
//!
//! # Generations
//!
//! Generations are `u32`. A slot starts at generation 0 and bumps on every
//! erase, wrapping after `u32::MAX` reuses. A handle held across 2^32 reuses
//! of its slot can alias the current occupant. This is accepted.
//!
//! # Concurrency
//!
//! No internal synchronization. Every mutating operation takes `&mut self`;
//! sharing a map across threads requires external locking.
//!
//! # Example
//!
//! ```
//! use nexus_slotmap::SlotMap;
//!
//! let mut map = SlotMap::new();
//! let a = map.insert(10);
//! let b = map.insert(20);
//!
//! assert!(map.erase(a));
//! assert_eq!(map.get(a), None);
//! assert_eq!(map.get(b), Some(&20));
//!
//! // Slot is reused with a bumped generation
//! let c = map.insert(30);
//! assert_eq!(c.index(), a.index());
//! assert_eq!(c.generation(), a.generation() + 1);
//! assert_eq!(map.get(a), None);
//! ```

mod error;
mod handle;
mod iter;
mod meta;

pub use error::{BuildError, CapacityExhausted};
pub use handle::Handle;
pub use iter::{Drain, Handles, IntoIter, Iter, IterMut, Values, ValuesMut};

use meta::{FREE_NONE, Slot, SlotState};

use core::fmt;
use core::ops::{Index, IndexMut};

/// Largest slot table a map can address. Index `u32::MAX` is the free list
/// sentinel, so valid indices are `0..u32::MAX`.
pub const MAX_SLOTS: usize = u32::MAX as usize;

// =============================================================================
// Builder
// =============================================================================

/// Builder for a slot map.
///
/// ```
/// use nexus_slotmap::SlotMapBuilder;
///
/// let map = SlotMapBuilder::default()
///     .capacity(1024)
///     .max_slots(4096)
///     .build::<u64>()
///     .unwrap();
/// assert!(map.capacity() >= 1024);
/// assert_eq!(map.max_slots(), 4096);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SlotMapBuilder {
    capacity: Option<usize>,
    max_slots: Option<usize>,
}

impl SlotMapBuilder {
    /// Pre-allocate room for this many values. Default: no allocation.
    pub fn capacity(mut self, n: usize) -> Self {
        self.capacity = Some(n);
        self
    }

    /// Bound the slot table (and so the number of live values).
    /// Default: [`MAX_SLOTS`].
    ///
    /// Once the table is at this size and every slot is occupied, inserts
    /// report [`CapacityExhausted`].
    pub fn max_slots(mut self, n: usize) -> Self {
        self.max_slots = Some(n);
        self
    }

    /// Build the slot map.
    pub fn build<T>(self) -> Result<SlotMap<T>, BuildError> {
        let max_slots = self.max_slots.unwrap_or(MAX_SLOTS);
        if max_slots == 0 {
            return Err(BuildError::ZeroMaxSlots);
        }
        if max_slots > MAX_SLOTS {
            return Err(BuildError::MaxSlotsTooLarge {
                max_slots,
                limit: MAX_SLOTS,
            });
        }

        let capacity = self.capacity.unwrap_or(0);
        if capacity > max_slots {
            return Err(BuildError::CapacityExceedsMaxSlots {
                capacity,
                max_slots,
            });
        }

        Ok(SlotMap {
            slots: Vec::with_capacity(capacity),
            handles: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            free_head: FREE_NONE,
            max_slots,
        })
    }
}

// =============================================================================
// SlotMap
// =============================================================================

/// Generational slot map with dense storage.
///
/// See the [crate docs](crate) for layout and guarantees.
#[derive(Clone)]
pub struct SlotMap<T> {
    // Slot table, indexed by Handle::index. Never shrinks.
    slots: Vec<Slot>,

    // Dense storage. handles[i] owns values[i].
    handles: Vec<Handle>,
    values: Vec<T>,

    // Head of the vacant-slot list, or FREE_NONE.
    free_head: u32,

    max_slots: usize,
}

impl<T> SlotMap<T> {
    /// Create an empty map. Does not allocate.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            handles: Vec::new(),
            values: Vec::new(),
            free_head: FREE_NONE,
            max_slots: MAX_SLOTS,
        }
    }

    /// Create an empty map with room for `capacity` values.
    ///
    /// # Panics
    /// Panics if `capacity` exceeds [`MAX_SLOTS`].
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity <= MAX_SLOTS, "capacity exceeds index space");
        Self {
            slots: Vec::with_capacity(capacity),
            handles: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            free_head: FREE_NONE,
            max_slots: MAX_SLOTS,
        }
    }

    /// Insert a value, returning its handle.
    ///
    /// Reuses the most recently freed slot if there is one, otherwise
    /// appends a slot at generation 0.
    ///
    /// # Panics
    /// Panics if the index space is exhausted. Use
    /// [`try_insert`](Self::try_insert) to handle that case.
    pub fn insert(&mut self, value: T) -> Handle {
        match self.try_insert(value) {
            Ok(handle) => handle,
            Err(_) => panic!("slot map index space exhausted"),
        }
    }

    /// Insert a value, or hand it back if the index space is exhausted.
    ///
    /// On error the map is unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<Handle, CapacityExhausted<T>> {
        match self.vacant_handle() {
            Some(handle) => {
                self.occupy(handle, value);
                Ok(handle)
            }
            None => {
                log::warn!(
                    "slot map index space exhausted ({} slots, {} live)",
                    self.slots.len(),
                    self.values.len()
                );
                Err(CapacityExhausted(value))
            }
        }
    }

    /// Insert the value built by `f`, which receives the handle the value
    /// will be stored under.
    ///
    /// If `f` panics the map is unchanged.
    ///
    /// # Panics
    /// Panics if the index space is exhausted.
    pub fn insert_with_handle<F>(&mut self, f: F) -> Handle
    where
        F: FnOnce(Handle) -> T,
    {
        let Some(handle) = self.vacant_handle() else {
            panic!("slot map index space exhausted");
        };
        let value = f(handle);
        self.occupy(handle, value);
        handle
    }

    /// Get a shared reference to the value at `handle`.
    ///
    /// Returns `None` for stale or out-of-range handles.
    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        let dense = self.dense_index(handle)?;
        // dense_index only returns positions of live values
        self.values.get(dense)
    }

    /// Get a mutable reference to the value at `handle`.
    ///
    /// Returns `None` for stale or out-of-range handles.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let dense = self.dense_index(handle)?;
        self.values.get_mut(dense)
    }

    /// Returns true if `handle` refers to a live value.
    #[inline]
    pub fn contains(&self, handle: Handle) -> bool {
        self.dense_index(handle).is_some()
    }

    /// Remove and return the value at `handle`.
    ///
    /// Returns `None` (and changes nothing) for stale or out-of-range
    /// handles. Removing twice is a no-op the second time.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let dense = self.dense_index(handle)?;
        Some(self.remove_at(handle.index(), dense))
    }

    /// Erase the value at `handle`, dropping it.
    ///
    /// Returns false (and changes nothing) if the handle is stale or out of
    /// range.
    pub fn erase(&mut self, handle: Handle) -> bool {
        self.remove(handle).is_some()
    }

    /// Keep only the values for which `f` returns true.
    ///
    /// Handles of removed values go stale exactly as with
    /// [`erase`](Self::erase).
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(Handle, &mut T) -> bool,
    {
        let mut dense = 0;
        while dense < self.values.len() {
            let handle = self.handles[dense];
            if f(handle, &mut self.values[dense]) {
                dense += 1;
            } else {
                // The tail element now sits at `dense`; visit it next.
                drop(self.remove_at(handle.index(), dense));
            }
        }
    }

    /// Remove all values.
    ///
    /// Every handle issued so far goes stale. Slot table and dense capacity
    /// are kept for reuse.
    pub fn clear(&mut self) {
        self.invalidate_all();
        self.handles.clear();
        self.values.clear();
    }

    /// Remove all values, yielding `(Handle, T)` pairs.
    ///
    /// Every handle goes stale as soon as this is called, whether or not the
    /// iterator is consumed.
    pub fn drain(&mut self) -> Drain<'_, T> {
        self.invalidate_all();
        Drain {
            handles: self.handles.drain(..),
            values: self.values.drain(..),
        }
    }

    /// Reserve room for at least `additional` more inserts without
    /// reallocating.
    ///
    /// Slot-table growth is capped at `max_slots`. Existing handles are
    /// unaffected.
    pub fn reserve(&mut self, additional: usize) {
        let before = self.handles.capacity();

        self.handles.reserve(additional);
        self.values.reserve(additional);

        // Free slots absorb part of the burst before the table must grow
        let free = self.slots.len() - self.values.len();
        let room = self.max_slots - self.slots.len();
        let grow = additional.saturating_sub(free).min(room);
        self.slots.reserve(grow);

        if self.handles.capacity() != before {
            log::debug!(
                "slot map reserve: dense capacity {} -> {}, slot table capacity {}",
                before,
                self.handles.capacity(),
                self.slots.capacity()
            );
        }
    }

    /// Number of live values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no live values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of values dense storage can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.handles.capacity()
    }

    /// Length of the slot table (live plus vacant slots).
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Upper bound on the slot table.
    #[inline]
    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    /// Iterate `(Handle, &T)` in dense order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            handles: self.handles.iter(),
            values: self.values.iter(),
        }
    }

    /// Iterate `(Handle, &mut T)` in dense order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            handles: self.handles.iter(),
            values: self.values.iter_mut(),
        }
    }

    /// Iterate live values in dense order.
    #[inline]
    pub fn values(&self) -> Values<'_, T> {
        self.values.iter()
    }

    /// Iterate live values mutably in dense order.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_, T> {
        self.values.iter_mut()
    }

    /// Iterate live handles in dense order.
    #[inline]
    pub fn handles(&self) -> Handles<'_> {
        self.handles.iter().copied()
    }
}

// =============================================================================
// Internal
// =============================================================================

impl<T> SlotMap<T> {
    /// Resolve a handle to its dense position.
    #[inline]
    fn dense_index(&self, handle: Handle) -> Option<usize> {
        self.slots
            .get(handle.index() as usize)?
            .dense_at(handle.generation())
            .map(|dense| dense as usize)
    }

    /// Handle the next insert will receive, or `None` if the index space is
    /// exhausted. Does not mutate.
    #[inline]
    fn vacant_handle(&self) -> Option<Handle> {
        if self.free_head != FREE_NONE {
            let slot = &self.slots[self.free_head as usize];
            Some(Handle::new(self.free_head, slot.generation))
        } else if self.slots.len() < self.max_slots {
            Some(Handle::new(self.slots.len() as u32, 0))
        } else {
            None
        }
    }

    /// Store `value` under `handle`, which must come from `vacant_handle`.
    fn occupy(&mut self, handle: Handle, value: T) {
        let dense = self.values.len() as u32;

        // Dense pushes first: if either allocation fails the slot table
        // still describes the old state.
        self.values.push(value);
        self.handles.push(handle);

        if self.free_head != FREE_NONE {
            debug_assert_eq!(handle.index(), self.free_head);
            self.free_head = self.slots[self.free_head as usize].occupy(dense);
        } else {
            if self.slots.len() == self.slots.capacity() {
                log::debug!(
                    "slot map growing slot table past {} slots",
                    self.slots.capacity()
                );
            }
            self.slots.push(Slot::new_occupied(dense));
        }
    }

    /// Free slot `slot_idx` whose value lives at `dense`, returning the value.
    fn remove_at(&mut self, slot_idx: u32, dense: usize) -> T {
        self.slots[slot_idx as usize].vacate(self.free_head);
        self.free_head = slot_idx;

        self.handles.swap_remove(dense);
        let value = self.values.swap_remove(dense);

        // Whatever moved into the hole needs its slot pointed at it
        if let Some(moved) = self.handles.get(dense) {
            self.slots[moved.index() as usize].state = SlotState::Occupied {
                dense: dense as u32,
            };
        }

        value
    }

    /// Vacate every slot and rebuild the free list in ascending order.
    /// Dense storage is left for the caller to empty.
    fn invalidate_all(&mut self) {
        let len = self.slots.len();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let next_free = if i + 1 < len {
                (i + 1) as u32
            } else {
                FREE_NONE
            };
            if slot.is_occupied() {
                slot.vacate(next_free);
            } else {
                slot.state = SlotState::Vacant { next_free };
            }
        }
        self.free_head = if len == 0 { FREE_NONE } else { 0 };
    }

    /// Check every structural invariant. Panics on violation.
    #[cfg(test)]
    fn assert_invariants(&self) {
        assert_eq!(self.handles.len(), self.values.len());
        assert!(self.slots.len() <= self.max_slots);

        let occupied = self.slots.iter().filter(|slot| slot.is_occupied()).count();
        assert_eq!(occupied, self.values.len(), "occupied slots != dense len");

        for (dense, handle) in self.handles.iter().enumerate() {
            let slot = &self.slots[handle.index() as usize];
            assert_eq!(
                slot.dense_at(handle.generation()),
                Some(dense as u32),
                "back-reference mismatch at dense {dense}"
            );
        }

        let mut seen = vec![false; self.slots.len()];
        let mut free = 0;
        let mut cursor = self.free_head;
        while cursor != FREE_NONE {
            let idx = cursor as usize;
            assert!(!seen[idx], "free list revisits slot {idx}");
            seen[idx] = true;
            match self.slots[idx].state {
                SlotState::Vacant { next_free } => cursor = next_free,
                SlotState::Occupied { .. } => panic!("occupied slot {idx} on free list"),
            }
            free += 1;
        }
        assert_eq!(free + self.values.len(), self.slots.len());
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<T> Default for SlotMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SlotMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T> Index<Handle> for SlotMap<T> {
    type Output = T;

    /// # Panics
    /// Panics if the handle is stale or out of range.
    fn index(&self, handle: Handle) -> &T {
        match self.get(handle) {
            Some(value) => value,
            None => panic!("invalid handle: {handle:?}"),
        }
    }
}

impl<T> IndexMut<Handle> for SlotMap<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut T {
        match self.get_mut(handle) {
            Some(value) => value,
            None => panic!("invalid handle: {handle:?}"),
        }
    }
}

impl<'a, T> IntoIterator for &'a SlotMap<T> {
    type Item = (Handle, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SlotMap<T> {
    type Item = (Handle, &'a mut T);
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> IntoIterator for SlotMap<T> {
    type Item = (Handle, T);
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            handles: self.handles.into_iter(),
            values: self.values.into_iter(),
        }
    }
}
