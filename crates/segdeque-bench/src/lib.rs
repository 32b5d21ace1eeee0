//! Benchmark workloads for segdeque.
//!
//! Provides deterministic inputs shared by the criterion benches:
//!
//! - [`random_indices`]: seeded index sequence for random access and
//!   positional insert/erase
//! - [`end_choices`]: seeded front/back split for mixed push workloads
//! - [`filled`]: a deque prefilled through both ends

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use segdeque::SegDeque;

const LCG_MUL: u64 = 6364136223846793005;
const LCG_INC: u64 = 1442695040888963407;

fn lcg(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
    *state >> 33
}

/// Generate `n` deterministic indices in `0..len`.
///
/// Returns an empty vector when `len` is zero.
pub fn random_indices(len: usize, n: usize, seed: u64) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let mut state = seed;
    (0..n).map(|_| (lcg(&mut state) % len as u64) as usize).collect()
}

/// Generate `n` deterministic end choices; `true` means the front.
pub fn end_choices(n: usize, seed: u64) -> Vec<bool> {
    let mut state = seed;
    (0..n).map(|_| lcg(&mut state) & 1 == 1).collect()
}

/// Build a deque of `len` elements pushed alternately at the front and
/// back, so the window sits away from either end of the map.
pub fn filled<const B: usize>(len: usize) -> SegDeque<u64, B> {
    let mut deque = SegDeque::new();
    for v in 0..len as u64 {
        if v % 2 == 0 {
            deque.push_back(v);
        } else {
            deque.push_front(v);
        }
    }
    deque
}
