//! Generational handles.

use core::fmt;

/// Opaque handle to a value in a [`SlotMap`](crate::SlotMap).
///
/// A handle is `(index, generation)`. Two handles are equal iff both fields
/// match. It addresses one occupant of one slot; once that value is erased
/// the handle is stale forever (up to generation wraparound, see the crate
/// docs) and every lookup with it returns `None`.
///
/// Handles carry no ownership and are not tied to a particular map. Using a
/// handle with a map that did not issue it is memory safe but may resolve to
/// an unrelated value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    #[inline]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot occupant this handle was issued for.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Pack into a `u64`: index in the high half, generation in the low half.
    #[inline]
    pub const fn to_raw(self) -> u64 {
        ((self.index as u64) << 32) | (self.generation as u64)
    }

    /// Rebuild a handle from [`to_raw`](Self::to_raw) output.
    ///
    /// Any `u64` is accepted. A value that was never issued simply fails
    /// validation on lookup.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self {
            index: (raw >> 32) as u32,
            generation: raw as u32,
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.index, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_fields() {
        let h = Handle::new(123, 456);
        assert_eq!(h.index(), 123);
        assert_eq!(h.generation(), 456);
    }

    #[test]
    fn handle_raw_roundtrip() {
        let h = Handle::new(u32::MAX - 1, u32::MAX);
        assert_eq!(Handle::from_raw(h.to_raw()), h);
        assert_eq!(h.to_raw() >> 32, (u32::MAX - 1) as u64);
    }

    #[test]
    fn equality_needs_both_fields() {
        assert_eq!(Handle::new(1, 2), Handle::new(1, 2));
        assert_ne!(Handle::new(1, 2), Handle::new(1, 3));
        assert_ne!(Handle::new(1, 2), Handle::new(2, 2));
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Handle::new(4, 1)), "Handle(4v1)");
    }
}
