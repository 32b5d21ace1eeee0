//! Rollback guard for growth that runs caller code.
//!
//! [`GrowGuard`] wraps a deque while a grow operation constructs elements
//! from a caller-supplied closure or `Clone` impl. If that code panics, the
//! guard's drop puts the deque back the way it was: elements constructed so
//! far are destroyed and blocks allocated for the operation are released.

use crate::deque::SegDeque;
use crate::map::FreshBlocks;
use crate::window::Window;

pub(crate) struct GrowGuard<'a, T, const B: usize> {
    deque: &'a mut SegDeque<T, B>,
    before: Window<B>,
    fresh: FreshBlocks,
    armed: bool,
}

impl<'a, T, const B: usize> GrowGuard<'a, T, B> {
    /// Start guarding a back-growth. `fresh` lists the blocks the
    /// reservation allocated.
    pub(crate) fn new(deque: &'a mut SegDeque<T, B>, fresh: FreshBlocks) -> Self {
        Self {
            before: deque.window,
            deque,
            fresh,
            armed: true,
        }
    }

    /// Construct one element in the next reserved back slot.
    pub(crate) fn push_back(&mut self, value: T) {
        self.deque.construct_back(value);
    }

    /// Keep everything constructed so far.
    pub(crate) fn commit(mut self) {
        self.armed = false;
    }
}

impl<T, const B: usize> Drop for GrowGuard<'_, T, B> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let constructed = self.deque.window.len - self.before.len;
        while self.deque.window.len > self.before.len {
            drop(self.deque.destroy_back());
        }
        debug_assert_eq!(self.deque.window, self.before);
        self.deque.map.release(&self.fresh);
        tracing::debug!(
            constructed,
            released_blocks = self.fresh.len(),
            "growth rolled back"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::*;
    use crate::map::Side;

    #[test]
    fn commit_keeps_elements() {
        let mut deque: SegDeque<u32, 4> = SegDeque::new();
        let fresh = deque.reserve_slots(Side::Back, 3).unwrap();
        let mut guard = GrowGuard::new(&mut deque, fresh);
        for i in 0..3 {
            guard.push_back(i);
        }
        guard.commit();
        assert_eq!(deque.len(), 3);
    }

    #[test]
    fn panic_rolls_back_elements_and_blocks() {
        let mut deque: SegDeque<u32, 4> = SegDeque::new();
        deque.push_back(100);
        let allocated = deque.map.allocated();

        let result = catch_unwind(AssertUnwindSafe(|| {
            let fresh = deque.reserve_slots(Side::Back, 10).unwrap();
            let mut guard = GrowGuard::new(&mut deque, fresh);
            for i in 0..10 {
                if i == 7 {
                    panic!("fill failed");
                }
                guard.push_back(i);
            }
            guard.commit();
        }));

        assert!(result.is_err());
        assert_eq!(deque.len(), 1);
        assert_eq!(deque.front(), Some(&100));
        assert_eq!(deque.map.allocated(), allocated);
    }
}
