//! Iterators over a [`SegDeque`].
//!
//! [`Iter`] is a position pair over a shared deque and forwards every step
//! to indexed access. [`IterMut`] walks the live blocks directly so it can
//! hand out disjoint mutable references. [`IntoIter`] pops from the owned
//! deque.

use std::iter::FusedIterator;
use std::slice;

use crate::block::Block;
use crate::deque::SegDeque;

/// Shared front-to-back iterator. Created by [`SegDeque::iter`].
pub struct Iter<'a, T, const B: usize> {
    deque: &'a SegDeque<T, B>,
    front: usize,
    back: usize,
}

impl<'a, T, const B: usize> Iter<'a, T, B> {
    pub(crate) fn new(deque: &'a SegDeque<T, B>) -> Self {
        Self {
            deque,
            front: 0,
            back: deque.len(),
        }
    }
}

impl<T, const B: usize> Clone for Iter<'_, T, B> {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T, const B: usize> Iterator for Iter<'a, T, B> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let item = self.deque.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<'a, T, const B: usize> DoubleEndedIterator for Iter<'a, T, B> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.deque.get(self.back)
    }
}

impl<T, const B: usize> ExactSizeIterator for Iter<'_, T, B> {}

impl<T, const B: usize> FusedIterator for Iter<'_, T, B> {}

/// Mutable front-to-back iterator. Created by [`SegDeque::iter_mut`].
pub struct IterMut<'a, T, const B: usize> {
    blocks: slice::IterMut<'a, Option<Block<T, B>>>,
    front: slice::IterMut<'a, Option<T>>,
    back: slice::IterMut<'a, Option<T>>,
    remaining: usize,
}

impl<'a, T, const B: usize> IterMut<'a, T, B> {
    /// `blocks` must cover exactly the live blocks; slots outside the live
    /// range are empty and get skipped.
    pub(crate) fn new(blocks: &'a mut [Option<Block<T, B>>], len: usize) -> Self {
        Self {
            blocks: blocks.iter_mut(),
            front: Default::default(),
            back: Default::default(),
            remaining: len,
        }
    }
}

impl<'a, T, const B: usize> Iterator for IterMut<'a, T, B> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            if let Some(value) = self.front.by_ref().find_map(Option::as_mut) {
                self.remaining -= 1;
                return Some(value);
            }
            match self.blocks.next() {
                Some(handle) => {
                    if let Some(block) = handle.as_mut() {
                        self.front = block.slots_mut().iter_mut();
                    }
                }
                None => {
                    let value = self.back.by_ref().find_map(Option::as_mut)?;
                    self.remaining -= 1;
                    return Some(value);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, const B: usize> DoubleEndedIterator for IterMut<'a, T, B> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            if let Some(value) = self.back.by_ref().rev().find_map(Option::as_mut) {
                self.remaining -= 1;
                return Some(value);
            }
            match self.blocks.next_back() {
                Some(handle) => {
                    if let Some(block) = handle.as_mut() {
                        self.back = block.slots_mut().iter_mut();
                    }
                }
                None => {
                    let value = self.front.by_ref().rev().find_map(Option::as_mut)?;
                    self.remaining -= 1;
                    return Some(value);
                }
            }
        }
    }
}

impl<T, const B: usize> ExactSizeIterator for IterMut<'_, T, B> {}

impl<T, const B: usize> FusedIterator for IterMut<'_, T, B> {}

/// Owning front-to-back iterator. Created by `SegDeque::into_iter`.
pub struct IntoIter<T, const B: usize> {
    deque: SegDeque<T, B>,
}

impl<T, const B: usize> Iterator for IntoIter<T, B> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.deque.len();
        (len, Some(len))
    }
}

impl<T, const B: usize> DoubleEndedIterator for IntoIter<T, B> {
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T, const B: usize> ExactSizeIterator for IntoIter<T, B> {}

impl<T, const B: usize> FusedIterator for IntoIter<T, B> {}

impl<T, const B: usize> IntoIterator for SegDeque<T, B> {
    type Item = T;
    type IntoIter = IntoIter<T, B>;

    fn into_iter(self) -> IntoIter<T, B> {
        IntoIter { deque: self }
    }
}

impl<'a, T, const B: usize> IntoIterator for &'a SegDeque<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, B>;

    fn into_iter(self) -> Iter<'a, T, B> {
        self.iter()
    }
}

impl<'a, T, const B: usize> IntoIterator for &'a mut SegDeque<T, B> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, B>;

    fn into_iter(self) -> IterMut<'a, T, B> {
        self.iter_mut()
    }
}
