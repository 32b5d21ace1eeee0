//! The active window: which slots of the block map hold live elements.
//!
//! The window is a normalized absolute slot offset (`block * B + slot`) of
//! the first live element plus the element count. Block indices and
//! boundary slot offsets are derived, never stored, so they cannot drift
//! apart across map reallocations.

/// A `(block, slot)` pair naming one slot of the block map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub(crate) block: usize,
    pub(crate) slot: usize,
}

impl Cursor {
    /// Split an absolute slot number into its block and slot offset.
    #[inline]
    pub(crate) fn from_absolute<const B: usize>(abs: usize) -> Self {
        Self {
            block: abs / B,
            slot: abs % B,
        }
    }
}

/// Live range of the deque within the block map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Window<const B: usize> {
    /// Absolute slot of the first live element.
    pub(crate) head: usize,
    /// Number of live elements.
    pub(crate) len: usize,
}

impl<const B: usize> Window<B> {
    /// Absolute slot one past the last live element.
    #[inline]
    pub(crate) fn tail(&self) -> usize {
        self.head + self.len
    }

    /// Translate a logical index into its `(block, slot)` position.
    ///
    /// The caller guarantees `index < len` (or `index == len` when asking
    /// for the slot the next push_back would fill).
    #[inline]
    pub(crate) fn locate(&self, index: usize) -> Cursor {
        Cursor::from_absolute::<B>(self.head + index)
    }

    #[inline]
    pub(crate) fn first_block(&self) -> usize {
        self.head / B
    }

    /// Index of the block holding the last live element, if any.
    pub(crate) fn last_block(&self) -> Option<usize> {
        if self.len == 0 {
            None
        } else {
            Some((self.tail() - 1) / B)
        }
    }

    /// Number of map positions spanned from the start of the head block
    /// through the last live slot.
    ///
    /// An empty window whose head sits mid-block still spans that block:
    /// the slots before the head belong to it.
    pub(crate) fn span_blocks(&self) -> usize {
        (self.head % B + self.len).div_ceil(B)
    }

    /// Number of blocks that contain at least one live element.
    pub(crate) fn active_blocks(&self) -> usize {
        match self.last_block() {
            Some(last) => last - self.first_block() + 1,
            None => 0,
        }
    }

    /// Move the window by `blocks` whole blocks toward higher map indices.
    pub(crate) fn shift_right(&mut self, blocks: usize) {
        self.head += blocks * B;
    }

    /// Move the window by `blocks` whole blocks toward lower map indices.
    pub(crate) fn shift_left(&mut self, blocks: usize) {
        self.head -= blocks * B;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_crosses_block_boundary() {
        let window = Window::<10> { head: 17, len: 20 };
        assert_eq!(window.locate(0), Cursor { block: 1, slot: 7 });
        assert_eq!(window.locate(2), Cursor { block: 1, slot: 9 });
        assert_eq!(window.locate(3), Cursor { block: 2, slot: 0 });
        assert_eq!(window.locate(19), Cursor { block: 3, slot: 6 });
    }

    #[test]
    fn tail_on_block_boundary_stays_in_last_block() {
        let window = Window::<10> { head: 5, len: 15 };
        assert_eq!(window.tail(), 20);
        assert_eq!(window.last_block(), Some(1));
        assert_eq!(window.active_blocks(), 2);
        assert_eq!(window.span_blocks(), 2);
    }

    #[test]
    fn empty_window_has_no_active_blocks() {
        let window = Window::<10> { head: 33, len: 0 };
        assert_eq!(window.last_block(), None);
        assert_eq!(window.active_blocks(), 0);
        assert_eq!(window.span_blocks(), 1);
    }

    #[test]
    fn aligned_empty_window_spans_nothing() {
        let window = Window::<10> { head: 30, len: 0 };
        assert_eq!(window.span_blocks(), 0);
    }

    #[test]
    fn shifting_preserves_slot_offset() {
        let mut window = Window::<4> { head: 6, len: 3 };
        window.shift_right(5);
        assert_eq!(window.head, 26);
        assert_eq!(window.locate(0).slot, 2);
        window.shift_left(6);
        assert_eq!(window.head, 2);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn locate_round_trips(head in 0usize..10_000, len in 1usize..500, pick in any::<usize>()) {
                let window = Window::<7> { head, len };
                let index = pick % len;
                let at = window.locate(index);
                prop_assert!(at.slot < 7);
                prop_assert_eq!(at.block * 7 + at.slot, head + index);
                prop_assert!(at.block >= window.first_block());
                prop_assert!(Some(at.block) <= window.last_block());
                prop_assert!(window.active_blocks() <= window.span_blocks());
            }
        }
    }
}
