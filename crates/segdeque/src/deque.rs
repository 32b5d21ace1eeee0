//! The public sequence container.
//!
//! [`SegDeque`] composes the block map, active window and storage engine
//! into push/pop at both ends, positional insert/erase, random access and
//! resize.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::config::DequeConfig;
use crate::error::DequeError;
use crate::guard::GrowGuard;
use crate::iter::{Iter, IterMut};
use crate::map::{BlockMap, Side};
use crate::stats::StorageStats;
use crate::window::Window;

/// Default number of element slots per block.
pub const DEFAULT_BLOCK_CAPACITY: usize = 10;

/// A double-ended queue stored as a map of fixed-capacity blocks.
///
/// `B` is the number of slots per block and must be at least 1.
///
/// Pushing and popping at either end is amortized O(1); indexing is O(1);
/// [`insert`](Self::insert) and [`erase`](Self::erase) shift whichever side
/// of the position is shorter. Growing never moves existing elements in
/// memory: the block map is reallocated by moving block handles.
///
/// Operations that allocate come in two flavours. The `try_*` methods
/// report [`DequeError::AllocationFailed`] or
/// [`DequeError::CapacityOverflow`] and leave the deque unchanged; the
/// plain methods panic with the same message.
pub struct SegDeque<T, const B: usize = DEFAULT_BLOCK_CAPACITY> {
    pub(crate) map: BlockMap<T, B>,
    pub(crate) window: Window<B>,
    pub(crate) config: DequeConfig,
}

impl<T, const B: usize> SegDeque<T, B> {
    /// Create an empty deque. Allocates nothing until the first push.
    pub const fn new() -> Self {
        Self {
            map: BlockMap::new(),
            window: Window { head: 0, len: 0 },
            config: DequeConfig::new(),
        }
    }

    /// Create an empty deque with a custom growth policy.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::InvalidConfig`] if the config fails
    /// [`DequeConfig::validate`].
    pub fn with_config(config: DequeConfig) -> Result<Self, DequeError> {
        config.validate()?;
        Ok(Self {
            map: BlockMap::new(),
            window: Window { head: 0, len: 0 },
            config,
        })
    }

    /// Create a deque of `len` clones of `value`.
    ///
    /// Allocates exactly `ceil(len / B)` blocks and no map slack.
    pub fn with_len(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut deque = infallible(Self::try_with_exact_capacity(len, DequeConfig::new()));
        deque.resize(len, value);
        deque
    }

    /// The growth policy in effect.
    pub fn config(&self) -> &DequeConfig {
        &self.config
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.window.len
    }

    /// Whether the deque holds no elements.
    pub fn is_empty(&self) -> bool {
        self.window.len == 0
    }

    /// Element at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slot(index)
    }

    /// Mutable element at `index`, or `None` if out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slot_mut(index)
    }

    /// Bounds-checked access.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::OutOfRange`] if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, DequeError> {
        let len = self.len();
        self.slot(index)
            .ok_or(DequeError::OutOfRange { index, len })
    }

    /// Bounds-checked mutable access.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::OutOfRange`] if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DequeError> {
        let len = self.len();
        self.slot_mut(index)
            .ok_or(DequeError::OutOfRange { index, len })
    }

    /// First element, or `None` if empty.
    pub fn front(&self) -> Option<&T> {
        self.slot(0)
    }

    /// Mutable first element, or `None` if empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.slot_mut(0)
    }

    /// Last element, or `None` if empty.
    pub fn back(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|last| self.slot(last))
    }

    /// Mutable last element, or `None` if empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.len().checked_sub(1) {
            Some(last) => self.slot_mut(last),
            None => None,
        }
    }

    /// Append `value` at the back.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the map or a block could not be
    /// grown. The deque is unchanged and `value` is dropped.
    pub fn try_push_back(&mut self, value: T) -> Result<(), DequeError> {
        self.reserve_slots(Side::Back, 1)?;
        self.construct_back(value);
        Ok(())
    }

    /// Append `value` at the back.
    ///
    /// # Panics
    ///
    /// Panics if memory for the new slot cannot be allocated.
    pub fn push_back(&mut self, value: T) {
        infallible(self.try_push_back(value));
    }

    /// Prepend `value` at the front.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the map or a block could not be
    /// grown. The deque is unchanged and `value` is dropped.
    pub fn try_push_front(&mut self, value: T) -> Result<(), DequeError> {
        self.reserve_slots(Side::Front, 1)?;
        self.construct_front(value);
        Ok(())
    }

    /// Prepend `value` at the front.
    ///
    /// # Panics
    ///
    /// Panics if memory for the new slot cannot be allocated.
    pub fn push_front(&mut self, value: T) {
        infallible(self.try_push_front(value));
    }

    /// Remove and return the last element. The emptied block, if any, is
    /// kept as spare capacity.
    pub fn pop_back(&mut self) -> Option<T> {
        self.destroy_back()
    }

    /// Remove and return the first element. The emptied block, if any, is
    /// kept as spare capacity.
    pub fn pop_front(&mut self) -> Option<T> {
        self.destroy_front()
    }

    /// Insert `value` so that it ends up at `index`.
    ///
    /// Grows at whichever end is nearer to `index` and shifts the elements
    /// between that end and `index` by one.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::OutOfRange`] if `index > len()`, or an
    /// allocation error if growth failed. The deque is unchanged on error.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), DequeError> {
        let len = self.len();
        if index > len {
            return Err(DequeError::OutOfRange { index, len });
        }
        if index < len - index {
            self.try_push_front(value)?;
            for k in 0..index {
                self.swap_slots(k, k + 1);
            }
        } else {
            self.try_push_back(value)?;
            for k in (index..len).rev() {
                self.swap_slots(k, k + 1);
            }
        }
        Ok(())
    }

    /// Insert `value` so that it ends up at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()` or if memory cannot be allocated.
    pub fn insert(&mut self, index: usize, value: T) {
        infallible(self.try_insert(index, value));
    }

    /// Remove and return the element at `index`.
    ///
    /// Shifts whichever side of `index` is shorter to close the gap.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::OutOfRange`] if `index >= len()`.
    pub fn try_erase(&mut self, index: usize) -> Result<T, DequeError> {
        let len = self.len();
        let out_of_range = DequeError::OutOfRange { index, len };
        if index >= len {
            return Err(out_of_range);
        }
        let removed = if index < len - 1 - index {
            for k in (0..index).rev() {
                self.swap_slots(k, k + 1);
            }
            self.destroy_front()
        } else {
            for k in index..len - 1 {
                self.swap_slots(k, k + 1);
            }
            self.destroy_back()
        };
        removed.ok_or(out_of_range)
    }

    /// Remove and return the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> T {
        infallible(self.try_erase(index))
    }

    /// Swap the elements at `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn swap(&mut self, i: usize, j: usize) {
        let len = self.len();
        for index in [i, j] {
            if index >= len {
                out_of_range(index, len);
            }
        }
        self.swap_slots(i, j);
    }

    /// Drop elements from the back until `len()` is at most `len`.
    pub fn truncate(&mut self, len: usize) {
        while self.len() > len {
            drop(self.destroy_back());
        }
    }

    /// Drop every element. Blocks are kept for reuse.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resize to `new_len`, filling new back slots with values from `fill`.
    ///
    /// If `fill` panics, every element it produced during this call is
    /// dropped and blocks allocated for the call are released before the
    /// panic continues; the deque is left as it was.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if growth failed. `fill` is not called
    /// and the deque is unchanged.
    pub fn try_resize_with<F>(&mut self, new_len: usize, mut fill: F) -> Result<(), DequeError>
    where
        F: FnMut() -> T,
    {
        let len = self.len();
        if new_len <= len {
            self.truncate(new_len);
            return Ok(());
        }
        let additional = new_len - len;
        let fresh = self.reserve_slots(Side::Back, additional)?;
        let mut guard = GrowGuard::new(self, fresh);
        for _ in 0..additional {
            guard.push_back(fill());
        }
        guard.commit();
        Ok(())
    }

    /// Resize to `new_len`, filling new back slots with values from `fill`.
    ///
    /// # Panics
    ///
    /// Panics if memory cannot be allocated, or if `fill` panics (after
    /// rolling back).
    pub fn resize_with<F>(&mut self, new_len: usize, fill: F)
    where
        F: FnMut() -> T,
    {
        infallible(self.try_resize_with(new_len, fill));
    }

    /// Resize to `new_len`, cloning `value` into every new slot.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if growth failed.
    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), DequeError>
    where
        T: Clone,
    {
        self.try_resize_with(new_len, || value.clone())
    }

    /// Resize to `new_len`, cloning `value` into every new slot.
    ///
    /// # Panics
    ///
    /// Panics if memory cannot be allocated or if `T::clone` panics (after
    /// rolling back).
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        infallible(self.try_resize(new_len, value));
    }

    /// Make room for `additional` more elements at the back without
    /// further allocation.
    ///
    /// # Errors
    ///
    /// Returns an allocation error; the deque is unchanged.
    pub fn try_reserve_back(&mut self, additional: usize) -> Result<(), DequeError> {
        self.reserve_slots(Side::Back, additional).map(drop)
    }

    /// Make room for `additional` more elements at the front without
    /// further allocation.
    ///
    /// # Errors
    ///
    /// Returns an allocation error; the deque is unchanged.
    pub fn try_reserve_front(&mut self, additional: usize) -> Result<(), DequeError> {
        self.reserve_slots(Side::Front, additional).map(drop)
    }

    /// Free spare blocks and shrink the map to the blocks holding live
    /// elements.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::AllocationFailed`] if the smaller map could
    /// not be allocated. The deque is unchanged.
    pub fn try_shrink_to_fit(&mut self) -> Result<(), DequeError> {
        self.compact_storage()
    }

    /// Free spare blocks and shrink the map to the blocks holding live
    /// elements. Best effort: if the smaller map cannot be allocated the
    /// failure is logged and the deque is left as is.
    pub fn shrink_to_fit(&mut self) {
        if let Err(err) = self.try_shrink_to_fit() {
            tracing::debug!(error = %err, "shrink_to_fit skipped");
        }
    }

    /// Snapshot of the storage layout.
    pub fn stats(&self) -> StorageStats {
        let front_slack = self.window.head;
        StorageStats {
            len: self.len(),
            map_len: self.map.len(),
            allocated_blocks: self.map.allocated(),
            active_blocks: self.window.active_blocks(),
            front_slack,
            back_slack: self.map.slot_capacity() - self.window.tail(),
            map_reallocations: self.map.reallocations(),
            recenterings: self.map.recenterings(),
            memory_bytes: self.map.memory_bytes(),
        }
    }

    /// Bytes held by the block map and all allocated blocks.
    pub fn memory_bytes(&self) -> usize {
        self.map.memory_bytes()
    }

    /// Front-to-back iterator over shared references.
    pub fn iter(&self) -> Iter<'_, T, B> {
        Iter::new(self)
    }

    /// Front-to-back iterator over mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T, B> {
        let len = self.len();
        let blocks = match self.window.last_block() {
            Some(last) => self.window.first_block()..last + 1,
            None => 0..0,
        };
        IterMut::new(self.map.blocks_mut(blocks), len)
    }
}

/// Unwrap an operation result, panicking with the error's message.
#[track_caller]
fn infallible<R>(result: Result<R, DequeError>) -> R {
    match result {
        Ok(value) => value,
        Err(err) => panic!("segdeque: {err}"),
    }
}

#[cold]
#[track_caller]
fn out_of_range(index: usize, len: usize) -> ! {
    panic!("segdeque: {}", DequeError::OutOfRange { index, len })
}

impl<T, const B: usize> Default for SegDeque<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const B: usize> Clone for SegDeque<T, B> {
    /// Exact-fit copy: `ceil(len / B)` blocks, no map slack.
    fn clone(&self) -> Self {
        let mut copy = infallible(Self::try_with_exact_capacity(
            self.len(),
            self.config.clone(),
        ));
        for value in self {
            copy.construct_back(value.clone());
        }
        copy
    }

    /// Reuses the existing storage when it can hold `source` without
    /// growing the map; otherwise falls back to a fresh exact-fit copy.
    fn clone_from(&mut self, source: &Self) {
        let room = self.map.slot_capacity() - self.window.head;
        if room < source.len() {
            *self = source.clone();
            return;
        }
        self.truncate(source.len());
        let overlap = self.len();
        for (dst, src) in self.iter_mut().zip(source) {
            dst.clone_from(src);
        }
        for value in source.iter().skip(overlap) {
            self.push_back(value.clone());
        }
        self.config.clone_from(&source.config);
    }
}

impl<T: fmt::Debug, const B: usize> fmt::Debug for SegDeque<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const B: usize> Index<usize> for SegDeque<T, B> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.slot(index) {
            Some(value) => value,
            None => out_of_range(index, self.len()),
        }
    }
}

impl<T, const B: usize> IndexMut<usize> for SegDeque<T, B> {
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.slot_mut(index) {
            Some(value) => value,
            None => out_of_range(index, len),
        }
    }
}

impl<T, const B: usize> Extend<T> for SegDeque<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        infallible(self.try_reserve_back(lower));
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a, const B: usize> Extend<&'a T> for SegDeque<T, B> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const B: usize> FromIterator<T> for SegDeque<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T, const B: usize> From<Vec<T>> for SegDeque<T, B> {
    /// Exact-fit conversion, like [`Clone::clone`].
    fn from(values: Vec<T>) -> Self {
        let mut deque = infallible(Self::try_with_exact_capacity(
            values.len(),
            DequeConfig::new(),
        ));
        for value in values {
            deque.construct_back(value);
        }
        deque
    }
}

impl<T, const B: usize, const N: usize> From<[T; N]> for SegDeque<T, B> {
    fn from(values: [T; N]) -> Self {
        Self::from(Vec::from(values))
    }
}
