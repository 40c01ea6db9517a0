//! Slot identifier type.

use std::fmt;

/// Identifies a record slot in the backing file.
///
/// Slots are the on-disk stand-in for node pointers: a child link is the
/// `i32` index of the slot holding the child. `i32` matches the persisted
/// link width, with `-1` reserved as the null link.
///
/// # Example
/// ```
/// use avldb::SlotId;
///
/// let slot = SlotId::new(42);
/// assert!(slot.is_valid());
/// assert!(!SlotId::NIL.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub i32);

impl SlotId {
    /// The null link: "no child" in a record, "no tree" in the header.
    pub const NIL: SlotId = SlotId(-1);

    /// Create a new SlotId.
    #[inline]
    pub fn new(id: i32) -> Self {
        SlotId(id)
    }

    /// Check if this slot ID can address a slot (is non-negative).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }

    /// The slot index as a file-offset multiplier.
    ///
    /// Only meaningful for valid slots.
    #[inline]
    pub(crate) fn index(&self) -> u64 {
        debug_assert!(self.is_valid());
        self.0 as u64
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Slot({})", self.0)
        } else {
            write!(f, "Slot(NIL)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_id_new() {
        let slot = SlotId::new(42);
        assert_eq!(slot.0, 42);
        assert!(slot.is_valid());
    }

    #[test]
    fn test_slot_zero_is_valid() {
        assert!(SlotId::new(0).is_valid());
    }

    #[test]
    fn test_slot_id_nil() {
        assert!(!SlotId::NIL.is_valid());
        assert_eq!(SlotId::NIL.0, -1);
        assert!(!SlotId::new(-7).is_valid());
    }

    #[test]
    fn test_slot_id_display() {
        assert_eq!(format!("{}", SlotId::new(42)), "Slot(42)");
        assert_eq!(format!("{}", SlotId::NIL), "Slot(NIL)");
    }
}
