//! Equality, ordering and hashing.
//!
//! All comparisons walk both deques through [`SegDeque::iter`]; block
//! layout never affects the result.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::deque::SegDeque;

impl<T: PartialEq<U>, U, const B: usize, const C: usize> PartialEq<SegDeque<U, C>>
    for SegDeque<T, B>
{
    fn eq(&self, other: &SegDeque<U, C>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const B: usize> Eq for SegDeque<T, B> {}

impl<T: PartialEq<U>, U, const B: usize> PartialEq<Vec<U>> for SegDeque<T, B> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq<U>, U, const B: usize, const N: usize> PartialEq<[U; N]> for SegDeque<T, B> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.len() == N && self.iter().eq(other.iter())
    }
}

impl<T: PartialOrd, const B: usize> PartialOrd for SegDeque<T, B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, const B: usize> Ord for SegDeque<T, B> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, const B: usize> Hash for SegDeque<T, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for value in self {
            value.hash(state);
        }
    }
}
