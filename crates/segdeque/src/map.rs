//! The block map: an ordered, growable array of block handles.
//!
//! Position `i` of the map logically precedes position `i + 1`. A handle is
//! `None` until the window first needs a block there; emptied blocks stay
//! allocated as spare capacity. Growing the map moves handles into a new
//! array and never touches element data.

use std::ops::Range;

use smallvec::SmallVec;

use crate::block::Block;
use crate::error::DequeError;
use crate::window::Cursor;

/// Indices of blocks allocated by a single growth request.
pub(crate) type FreshBlocks = SmallVec<[usize; 4]>;

/// Which end of the deque a growth request extends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Front,
    Back,
}

pub(crate) struct BlockMap<T, const B: usize> {
    handles: Vec<Option<Block<T, B>>>,
    reallocations: u64,
    recenterings: u64,
}

impl<T, const B: usize> BlockMap<T, B> {
    /// An empty map with no handles.
    pub(crate) const fn new() -> Self {
        Self {
            handles: Vec::new(),
            reallocations: 0,
            recenterings: 0,
        }
    }

    /// A map of exactly `count` allocated blocks, no slack.
    pub(crate) fn try_with_blocks(count: usize) -> Result<Self, DequeError> {
        let mut handles = Vec::new();
        handles
            .try_reserve_exact(count)
            .map_err(|_| Self::handle_alloc_failed(count))?;
        for _ in 0..count {
            handles.push(Some(Block::try_new()?));
        }
        Ok(Self {
            handles,
            reallocations: 0,
            recenterings: 0,
        })
    }

    /// Map length in block handles.
    pub(crate) fn len(&self) -> usize {
        self.handles.len()
    }

    /// Total slots addressable through the map.
    pub(crate) fn slot_capacity(&self) -> usize {
        self.handles.len() * B
    }

    pub(crate) fn get(&self, at: Cursor) -> Option<&T> {
        self.handles.get(at.block)?.as_ref()?.get(at.slot)
    }

    pub(crate) fn get_mut(&mut self, at: Cursor) -> Option<&mut T> {
        self.handles.get_mut(at.block)?.as_mut()?.get_mut(at.slot)
    }

    /// Construct `value` at `at`.
    ///
    /// # Panics
    ///
    /// Panics if the block at `at` was never allocated; growth must
    /// reserve it first.
    pub(crate) fn construct(&mut self, at: Cursor, value: T) {
        match self.handles[at.block].as_mut() {
            Some(block) => block.construct(at.slot, value),
            None => panic!("construct into unallocated block {}", at.block),
        }
    }

    /// Destroy the element at `at` and return it.
    pub(crate) fn destroy(&mut self, at: Cursor) -> Option<T> {
        self.handles.get_mut(at.block)?.as_mut()?.destroy(at.slot)
    }

    /// Swap the contents of two slots, possibly in different blocks.
    pub(crate) fn swap(&mut self, a: Cursor, b: Cursor) {
        debug_assert!(
            self.handles[a.block].is_some() && self.handles[b.block].is_some(),
            "swap between blocks {} and {} touches an unallocated block",
            a.block,
            b.block
        );
        if a.block == b.block {
            if let Some(block) = self.handles[a.block].as_mut() {
                block.swap(a.slot, b.slot);
            }
            return;
        }
        let (lo, hi) = if a.block < b.block { (a, b) } else { (b, a) };
        let (left, right) = self.handles.split_at_mut(hi.block);
        if let (Some(lo_block), Some(hi_block)) = (left[lo.block].as_mut(), right[0].as_mut()) {
            std::mem::swap(lo_block.slot_mut(lo.slot), hi_block.slot_mut(hi.slot));
        }
    }

    /// Make sure every handle in `blocks` owns a block.
    ///
    /// Returns the indices that had to be allocated. On failure, blocks
    /// allocated by this call are released again before the error is
    /// returned.
    pub(crate) fn ensure_allocated(
        &mut self,
        blocks: Range<usize>,
    ) -> Result<FreshBlocks, DequeError> {
        let mut fresh = FreshBlocks::new();
        for index in blocks {
            if self.handles[index].is_some() {
                continue;
            }
            match Block::try_new() {
                Ok(block) => {
                    self.handles[index] = Some(block);
                    fresh.push(index);
                }
                Err(err) => {
                    tracing::warn!(block = index, error = %err, "block allocation failed");
                    self.release(&fresh);
                    return Err(err);
                }
            }
        }
        Ok(fresh)
    }

    /// Free the blocks at the given indices. They must hold no live elements.
    pub(crate) fn release(&mut self, blocks: &[usize]) {
        for &index in blocks {
            debug_assert!(
                self.handles[index].as_ref().is_none_or(|b| b.live() == 0),
                "releasing block {index} with live elements"
            );
            self.handles[index] = None;
        }
    }

    /// Move every handle into a new map of `new_len` handles.
    ///
    /// The handles in `live` land at `new_first..`, keeping their order.
    /// Spare blocks from the rest of the old map are placed next to the
    /// live range on `side`; any that do not fit are freed.
    pub(crate) fn regrow(
        &mut self,
        new_len: usize,
        live: Range<usize>,
        new_first: usize,
        side: Side,
    ) -> Result<(), DequeError> {
        debug_assert!(new_first + live.len() <= new_len);
        let mut handles = Vec::new();
        if handles.try_reserve_exact(new_len).is_err() {
            let err = Self::handle_alloc_failed(new_len);
            tracing::warn!(new_len, error = %err, "block map allocation failed");
            return Err(err);
        }
        handles.resize_with(new_len, || None);

        let old_len = self.handles.len();
        let live_blocks = live.len();
        let mut old = std::mem::take(&mut self.handles);
        for (offset, handle) in old.drain(live).enumerate() {
            handles[new_first + offset] = handle;
        }

        let spares = old.into_iter().flatten();
        let after = new_first + live_blocks;
        match side {
            Side::Back => {
                for (index, block) in (after..new_len).zip(spares) {
                    handles[index] = Some(block);
                }
            }
            Side::Front => {
                for (index, block) in (0..new_first).rev().zip(spares) {
                    handles[index] = Some(block);
                }
            }
        }

        self.handles = handles;
        self.reallocations += 1;
        tracing::debug!(
            old_len,
            new_len,
            live_blocks,
            new_first,
            ?side,
            "block map reallocated"
        );
        Ok(())
    }

    /// Rotate handles in place so the block at `old_first` moves to
    /// `new_first`. Used when the map has room but the live blocks sit
    /// against one end.
    pub(crate) fn recenter(&mut self, old_first: usize, new_first: usize) {
        if new_first > old_first {
            self.handles.rotate_right(new_first - old_first);
        } else {
            self.handles.rotate_left(old_first - new_first);
        }
        self.recenterings += 1;
        tracing::debug!(
            map_len = self.handles.len(),
            old_first,
            new_first,
            "block map recentered in place"
        );
    }

    /// Keep only the handles in `live`, freeing every other block.
    pub(crate) fn compact(&mut self, live: Range<usize>) -> Result<(), DequeError> {
        let mut handles = Vec::new();
        if handles.try_reserve_exact(live.len()).is_err() {
            let err = Self::handle_alloc_failed(live.len());
            tracing::warn!(new_len = live.len(), error = %err, "block map compaction failed");
            return Err(err);
        }
        let old_len = self.handles.len();
        handles.extend(self.handles.drain(live));
        self.handles = handles;
        tracing::trace!(old_len, new_len = self.handles.len(), "block map compacted");
        Ok(())
    }

    pub(crate) fn blocks_mut(&mut self, range: Range<usize>) -> &mut [Option<Block<T, B>>] {
        &mut self.handles[range]
    }

    /// Live elements summed over every allocated block.
    pub(crate) fn occupied(&self) -> usize {
        self.handles.iter().flatten().map(Block::live).sum()
    }

    /// Number of handles that own a block.
    pub(crate) fn allocated(&self) -> usize {
        self.handles.iter().filter(|h| h.is_some()).count()
    }

    pub(crate) fn reallocations(&self) -> u64 {
        self.reallocations
    }

    pub(crate) fn recenterings(&self) -> u64 {
        self.recenterings
    }

    /// Memory held by the handle array and every allocated block.
    pub(crate) fn memory_bytes(&self) -> usize {
        self.handles.capacity() * std::mem::size_of::<Option<Block<T, B>>>()
            + self.allocated() * Block::<T, B>::bytes()
    }

    fn handle_alloc_failed(count: usize) -> DequeError {
        DequeError::AllocationFailed {
            requested_bytes: count.saturating_mul(std::mem::size_of::<Option<Block<T, B>>>()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(block: usize, slot: usize) -> Cursor {
        Cursor { block, slot }
    }

    #[test]
    fn new_map_is_empty() {
        let map: BlockMap<u32, 4> = BlockMap::new();
        assert_eq!(map.len(), 0);
        assert_eq!(map.slot_capacity(), 0);
        assert_eq!(map.allocated(), 0);
    }

    #[test]
    fn exact_map_allocates_every_block() {
        let map: BlockMap<u32, 4> = BlockMap::try_with_blocks(3).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.allocated(), 3);
    }

    #[test]
    fn ensure_allocated_reports_only_new_blocks() {
        let mut map: BlockMap<u32, 4> = BlockMap::new();
        map.regrow(6, 0..0, 0, Side::Back).unwrap();
        let fresh = map.ensure_allocated(1..3).unwrap();
        assert_eq!(fresh.as_slice(), &[1, 2]);
        let fresh = map.ensure_allocated(0..4).unwrap();
        assert_eq!(fresh.as_slice(), &[0, 3]);
        assert_eq!(map.allocated(), 4);
        map.release(&fresh);
        assert_eq!(map.allocated(), 2);
    }

    #[test]
    fn cross_block_swap() {
        let mut map: BlockMap<u32, 2> = BlockMap::try_with_blocks(2).unwrap();
        map.construct(at(0, 1), 1);
        map.construct(at(1, 0), 2);
        map.swap(at(1, 0), at(0, 1));
        assert_eq!(map.get(at(0, 1)), Some(&2));
        assert_eq!(map.get(at(1, 0)), Some(&1));
    }

    #[test]
    #[should_panic(expected = "construct into unallocated block 3")]
    fn construct_requires_allocated_block() {
        let mut map: BlockMap<u32, 2> = BlockMap::new();
        map.regrow(4, 0..0, 0, Side::Back).unwrap();
        map.construct(at(3, 0), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "touches an unallocated block")]
    fn swap_with_unallocated_block_is_caught() {
        let mut map: BlockMap<u32, 2> = BlockMap::new();
        map.regrow(3, 0..0, 0, Side::Back).unwrap();
        map.ensure_allocated(0..1).unwrap();
        map.construct(at(0, 0), 1);
        map.swap(at(0, 0), at(2, 1));
    }

    #[test]
    fn occupied_counts_live_slots() {
        let mut map: BlockMap<u32, 3> = BlockMap::try_with_blocks(3).unwrap();
        assert_eq!(map.occupied(), 0);
        map.construct(at(0, 2), 1);
        map.construct(at(2, 0), 2);
        assert_eq!(map.occupied(), 2);
        map.destroy(at(0, 2));
        assert_eq!(map.occupied(), 1);
    }

    #[test]
    fn regrow_moves_handles_not_elements() {
        let mut map: BlockMap<String, 2> = BlockMap::try_with_blocks(2).unwrap();
        map.construct(at(0, 0), "a".into());
        map.construct(at(1, 1), "b".into());
        let before = map.get(at(0, 0)).map(|s| s as *const String);

        map.regrow(6, 0..2, 2, Side::Back).unwrap();
        assert_eq!(map.len(), 6);
        assert_eq!(map.get(at(2, 0)).map(String::as_str), Some("a"));
        assert_eq!(map.get(at(3, 1)).map(String::as_str), Some("b"));
        assert_eq!(map.get(at(2, 0)).map(|s| s as *const String), before);
        assert_eq!(map.reallocations(), 1);
    }

    #[test]
    fn regrow_keeps_spares_on_growth_side() {
        let mut map: BlockMap<u32, 2> = BlockMap::try_with_blocks(3).unwrap();
        map.construct(at(1, 0), 7);
        map.regrow(9, 1..2, 2, Side::Back).unwrap();
        assert_eq!(map.get(at(2, 0)), Some(&7));
        assert_eq!(map.allocated(), 3);
        assert!(map.handles[3].is_some());
        assert!(map.handles[4].is_some());

        let mut map: BlockMap<u32, 2> = BlockMap::try_with_blocks(3).unwrap();
        map.construct(at(1, 0), 7);
        map.regrow(9, 1..2, 5, Side::Front).unwrap();
        assert!(map.handles[4].is_some());
        assert!(map.handles[3].is_some());
        assert_eq!(map.get(at(5, 0)), Some(&7));
    }

    #[test]
    fn recenter_rotates_live_blocks() {
        let mut map: BlockMap<u32, 2> = BlockMap::try_with_blocks(6).unwrap();
        map.construct(at(5, 0), 1);
        map.recenter(5, 2);
        assert_eq!(map.get(at(2, 0)), Some(&1));
        assert_eq!(map.allocated(), 6);
        assert_eq!(map.recenterings(), 1);
    }

    #[test]
    fn compact_keeps_only_live_range() {
        let mut map: BlockMap<u32, 2> = BlockMap::try_with_blocks(5).unwrap();
        map.construct(at(2, 1), 9);
        map.compact(2..3).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(at(0, 1)), Some(&9));
    }
}
