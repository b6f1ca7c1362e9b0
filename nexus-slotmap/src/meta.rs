//! Internal slot-table bookkeeping for the slot map.
//!
//! A slot is a fixed-position entry addressed by `Handle::index`. It never
//! holds the value itself; occupied slots point into dense storage, vacant
//! slots link the free list. Value storage lives in lib.rs.

/// Sentinel for the end of the free list.
pub(crate) const FREE_NONE: u32 = u32::MAX;

/// Occupancy of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SlotState {
    /// Slot is on the free list. `next_free` is the next vacant slot index,
    /// or `FREE_NONE` at the tail.
    Vacant { next_free: u32 },
    /// Slot owns the value at `dense` in dense storage.
    Occupied { dense: u32 },
}

/// A slot-table entry.
///
/// `generation` is the generation of the current occupant while occupied,
/// and the generation the next occupant will receive while vacant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Slot {
    pub generation: u32,
    pub state: SlotState,
}

impl Slot {
    /// A freshly appended slot, occupied at generation 0.
    #[inline]
    pub const fn new_occupied(dense: u32) -> Self {
        Self {
            generation: 0,
            state: SlotState::Occupied { dense },
        }
    }

    /// Returns the dense position if the slot is occupied at `generation`.
    #[inline]
    pub const fn dense_at(&self, generation: u32) -> Option<u32> {
        match self.state {
            SlotState::Occupied { dense } if self.generation == generation => Some(dense),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_occupied(&self) -> bool {
        matches!(self.state, SlotState::Occupied { .. })
    }

    /// Transition occupied -> vacant. Bumps the generation so every handle
    /// issued for the previous occupant goes stale.
    ///
    /// Wraps after `u32::MAX` reuses of the same slot.
    #[inline]
    pub fn vacate(&mut self, next_free: u32) {
        debug_assert!(self.is_occupied(), "vacate on vacant slot");
        self.generation = self.generation.wrapping_add(1);
        self.state = SlotState::Vacant { next_free };
    }

    /// Transition vacant -> occupied. Returns the free-list successor.
    #[inline]
    pub fn occupy(&mut self, dense: u32) -> u32 {
        match self.state {
            SlotState::Vacant { next_free } => {
                self.state = SlotState::Occupied { dense };
                next_free
            }
            SlotState::Occupied { .. } => panic!("free list corruption: occupied slot in free list"),
        }
    }
}
