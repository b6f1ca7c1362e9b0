//! Error types for slot map construction and insertion.

use core::fmt;

/// The slot map's index space is exhausted.
///
/// Returned by [`SlotMap::try_insert`](crate::SlotMap::try_insert) when the
/// free list is empty and the slot table has reached `max_slots`. Contains
/// the value that could not be inserted. Nothing inside the map frees up
/// index space on its own; the caller has to erase something first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExhausted<T>(
    /// The value that could not be inserted.
    pub T,
);

impl<T> CapacityExhausted<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for CapacityExhausted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot map index space exhausted")
    }
}

impl<T: fmt::Debug> std::error::Error for CapacityExhausted<T> {}

/// Error during slot map construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// `max_slots` is zero.
    ZeroMaxSlots,
    /// `max_slots` exceeds the addressable index space.
    MaxSlotsTooLarge { max_slots: usize, limit: usize },
    /// Requested capacity is larger than `max_slots`.
    CapacityExceedsMaxSlots { capacity: usize, max_slots: usize },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::ZeroMaxSlots => write!(f, "max_slots cannot be zero"),
            BuildError::MaxSlotsTooLarge { max_slots, limit } => {
                write!(f, "max_slots ({max_slots}) exceeds index space ({limit})")
            }
            BuildError::CapacityExceedsMaxSlots {
                capacity,
                max_slots,
            } => write!(f, "capacity ({capacity}) exceeds max_slots ({max_slots})"),
        }
    }
}

impl std::error::Error for BuildError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_exhausted_returns_value() {
        let err = CapacityExhausted(String::from("payload"));
        assert_eq!(err.to_string(), "slot map index space exhausted");
        assert_eq!(err.into_inner(), "payload");
    }

    #[test]
    fn build_error_display() {
        assert_eq!(
            BuildError::ZeroMaxSlots.to_string(),
            "max_slots cannot be zero"
        );
        let err = BuildError::CapacityExceedsMaxSlots {
            capacity: 10,
            max_slots: 4,
        };
        assert_eq!(err.to_string(), "capacity (10) exceeds max_slots (4)");
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<BuildError>();
        assert_error::<CapacityExhausted<u64>>();
    }
}
