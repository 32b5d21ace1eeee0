//! Storage engine: index translation and window/map growth.
//!
//! Every size-changing operation of [`SegDeque`] goes through here. Growth
//! first checks the slack on the requested side of the map, then either
//! recenters the live blocks inside the existing map or moves all block
//! handles into a larger one, and finally allocates any blocks the new
//! slots need. Shrinking only retracts the window; emptied blocks stay in
//! the map as spare capacity.

use crate::deque::SegDeque;
use crate::error::DequeError;
use crate::map::{BlockMap, FreshBlocks, Side};
use crate::window::{Cursor, Window};
use crate::DequeConfig;

impl<T, const B: usize> SegDeque<T, B> {
    /// A deque whose map holds exactly enough blocks for `len` elements,
    /// with the window starting at slot 0.
    pub(crate) fn try_with_exact_capacity(
        len: usize,
        config: DequeConfig,
    ) -> Result<Self, DequeError> {
        Ok(Self {
            map: BlockMap::try_with_blocks(len.div_ceil(B))?,
            window: Window { head: 0, len: 0 },
            config,
        })
    }

    pub(crate) fn slot(&self, index: usize) -> Option<&T> {
        if index >= self.window.len {
            return None;
        }
        self.map.get(self.window.locate(index))
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.window.len {
            return None;
        }
        self.map.get_mut(self.window.locate(index))
    }

    pub(crate) fn swap_slots(&mut self, a: usize, b: usize) {
        self.map.swap(self.window.locate(a), self.window.locate(b));
    }

    /// Guarantee `slots` free, block-backed slots on `side` of the window.
    ///
    /// Returns the blocks allocated for the request so a caller that fails
    /// partway through can hand them back.
    pub(crate) fn reserve_slots(
        &mut self,
        side: Side,
        slots: usize,
    ) -> Result<FreshBlocks, DequeError> {
        if slots == 0 {
            return Ok(FreshBlocks::new());
        }
        self.window
            .tail()
            .checked_add(slots)
            .ok_or(DequeError::CapacityOverflow)?;
        self.make_room(side, slots)?;

        let blocks = match side {
            Side::Back => {
                let start = self.window.tail();
                start / B..(start + slots - 1) / B + 1
            }
            Side::Front => {
                let head = self.window.head;
                (head - slots) / B..(head - 1) / B + 1
            }
        };
        self.map.ensure_allocated(blocks)
    }

    /// Free slots currently available on `side` without touching the map.
    fn slack(&self, side: Side) -> usize {
        match side {
            Side::Front => self.window.head,
            Side::Back => self.map.slot_capacity() - self.window.tail(),
        }
    }

    fn make_room(&mut self, side: Side, slots: usize) -> Result<(), DequeError> {
        while self.slack(side) < slots {
            self.remap(side, slots)?;
        }
        Ok(())
    }

    /// Rearrange the map so that at least `slots` free slots exist on `side`.
    ///
    /// If the map is at least twice the size the live blocks plus the
    /// request need, the handles are rotated in place. Otherwise a new map
    /// of `max(min_map_blocks, len * factor, needed * factor)` handles is
    /// allocated and every handle moved into it.
    fn remap(&mut self, side: Side, slots: usize) -> Result<(), DequeError> {
        let need = slots.div_ceil(B);
        let live = self.window.span_blocks();
        let wanted = live.checked_add(need).ok_or(DequeError::CapacityOverflow)?;
        let doubled = wanted
            .checked_mul(2)
            .ok_or(DequeError::CapacityOverflow)?;
        let factor = self.config.growth_factor;
        let map_len = self.map.len();
        let old_first = self.window.first_block();

        if map_len >= doubled {
            let new_first = placement(side, map_len, live, need, factor);
            self.map.recenter(old_first, new_first);
            self.move_window(old_first, new_first);
            return Ok(());
        }

        let new_len = map_len
            .checked_mul(factor)
            .zip(wanted.checked_mul(factor))
            .map(|(grown, sized)| grown.max(sized).max(self.config.min_map_blocks))
            .ok_or(DequeError::CapacityOverflow)?;
        new_len
            .checked_mul(B)
            .ok_or(DequeError::CapacityOverflow)?;

        let new_first = placement(side, new_len, live, need, factor);
        self.map
            .regrow(new_len, old_first..old_first + live, new_first, side)?;
        self.move_window(old_first, new_first);
        Ok(())
    }

    fn move_window(&mut self, old_first: usize, new_first: usize) {
        if new_first >= old_first {
            self.window.shift_right(new_first - old_first);
        } else {
            self.window.shift_left(old_first - new_first);
        }
    }

    /// Place `value` in the slot just past the last live element.
    ///
    /// The slot must already be reserved.
    pub(crate) fn construct_back(&mut self, value: T) {
        let at = self.window.locate(self.window.len);
        self.map.construct(at, value);
        self.window.len += 1;
    }

    /// Place `value` in the slot just before the first live element.
    ///
    /// The slot must already be reserved.
    pub(crate) fn construct_front(&mut self, value: T) {
        self.window.head -= 1;
        self.map
            .construct(Cursor::from_absolute::<B>(self.window.head), value);
        self.window.len += 1;
    }

    pub(crate) fn destroy_back(&mut self) -> Option<T> {
        if self.window.len == 0 {
            return None;
        }
        let value = self.map.destroy(self.window.locate(self.window.len - 1));
        self.window.len -= 1;
        value
    }

    pub(crate) fn destroy_front(&mut self) -> Option<T> {
        if self.window.len == 0 {
            return None;
        }
        let value = self.map.destroy(self.window.locate(0));
        self.window.head += 1;
        self.window.len -= 1;
        value
    }

    /// Free every spare block and shrink the map to the live blocks.
    ///
    /// On failure the map and window are untouched.
    pub(crate) fn compact_storage(&mut self) -> Result<(), DequeError> {
        let first = self.window.first_block();
        let live = self.window.active_blocks();
        self.map.compact(first..first + live)?;
        self.window.head = if live == 0 { 0 } else { self.window.head % B };
        Ok(())
    }

    /// Verify the storage layout against the window.
    ///
    /// Checks that the window fits inside the map, that every slot in
    /// `[head, tail)` holds an element, and that no other slot does.
    /// Returns a description of the first violation found.
    #[doc(hidden)]
    pub fn check_layout(&self) -> Result<(), String> {
        let tail = self.window.tail();
        let capacity = self.map.slot_capacity();
        if tail > capacity {
            return Err(format!(
                "window [{}, {tail}) exceeds map of {capacity} slots",
                self.window.head
            ));
        }
        if let Some(index) = (0..self.window.len).find(|&i| self.slot(i).is_none()) {
            return Err(format!("live index {index} has no element"));
        }
        let occupied = self.map.occupied();
        if occupied != self.window.len {
            return Err(format!(
                "{occupied} occupied slots for a window of {} elements",
                self.window.len
            ));
        }
        Ok(())
    }
}

/// First map index for the live blocks after a remap.
///
/// The free handles, minus the `need` reserved on `side`, are split
/// `1 : factor - 1`, with the larger share on `side`.
fn placement(side: Side, map_len: usize, live: usize, need: usize, factor: usize) -> usize {
    let free = map_len - live;
    let minor = (free - need) / factor;
    match side {
        Side::Back => minor,
        Side::Front => free - minor,
    }
}
