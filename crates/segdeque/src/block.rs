//! Fixed-capacity element blocks.
//!
//! A [`Block`] is the unit of storage: `B` slots allocated together and
//! never resized. Slots outside the deque's live range are `None`.

use crate::error::DequeError;

/// A fixed-capacity run of element slots.
///
/// Moving a `Block` moves only its boxed-slice handle; the slots stay where
/// they were allocated.
pub(crate) struct Block<T, const B: usize> {
    slots: Box<[Option<T>]>,
}

impl<T, const B: usize> Block<T, B> {
    const NON_EMPTY: () = assert!(B > 0, "block capacity must be at least 1");

    /// Allocate an empty block, reporting allocation failure.
    pub(crate) fn try_new() -> Result<Self, DequeError> {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(B)
            .map_err(|_| DequeError::AllocationFailed {
                requested_bytes: Self::bytes(),
            })?;
        slots.resize_with(B, || None);
        Ok(Self {
            slots: slots.into_boxed_slice(),
        })
    }

    /// Construct `value` in the given slot.
    ///
    /// The slot must be empty.
    pub(crate) fn construct(&mut self, slot: usize, value: T) {
        debug_assert!(self.slots[slot].is_none(), "slot {slot} already live");
        self.slots[slot] = Some(value);
    }

    /// Destroy the element in the given slot, handing it back to the caller.
    pub(crate) fn destroy(&mut self, slot: usize) -> Option<T> {
        self.slots[slot].take()
    }

    pub(crate) fn get(&self, slot: usize) -> Option<&T> {
        self.slots[slot].as_ref()
    }

    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots[slot].as_mut()
    }

    /// Swap two slots of this block.
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Raw slot access, used for cross-block swaps.
    pub(crate) fn slot_mut(&mut self, slot: usize) -> &mut Option<T> {
        &mut self.slots[slot]
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Option<T>] {
        &mut self.slots
    }

    /// Number of live elements in this block.
    pub(crate) fn live(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Memory usage of one block's slots in bytes.
    pub(crate) fn bytes() -> usize {
        B * std::mem::size_of::<Option<T>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_block_is_empty() {
        let block: Block<u32, 4> = Block::try_new().unwrap();
        assert_eq!(block.live(), 0);
        assert!((0..4).all(|s| block.get(s).is_none()));
    }

    #[test]
    fn construct_then_destroy_returns_value() {
        let mut block: Block<String, 4> = Block::try_new().unwrap();
        block.construct(2, "x".to_string());
        assert_eq!(block.get(2).map(String::as_str), Some("x"));
        assert_eq!(block.live(), 1);
        assert_eq!(block.destroy(2).as_deref(), Some("x"));
        assert_eq!(block.live(), 0);
        assert!(block.destroy(2).is_none());
    }

    #[test]
    fn swap_within_block() {
        let mut block: Block<u32, 3> = Block::try_new().unwrap();
        block.construct(0, 10);
        block.construct(2, 30);
        block.swap(0, 1);
        assert_eq!(block.get(0), None);
        assert_eq!(block.get(1), Some(&10));
        assert_eq!(block.get(2), Some(&30));
    }

    #[test]
    fn bytes_scale_with_capacity() {
        assert_eq!(
            Block::<u64, 10>::bytes(),
            10 * std::mem::size_of::<Option<u64>>()
        );
    }
}
