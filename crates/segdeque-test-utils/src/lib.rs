//! Test utilities for segdeque development.
//!
//! Provides an [`Op`] vocabulary with proptest strategies, a driver that
//! applies each op to a [`SegDeque`] and a `Vec` reference model in
//! lockstep, and the instrumented element types in [`fixtures`].

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use proptest::prelude::*;
use segdeque::{DequeError, SegDeque};

/// One mutating operation on a deque.
///
/// Positional ops carry a raw index that is reduced modulo the current
/// length when applied, so any generated sequence is meaningful.
#[derive(Clone, Debug)]
pub enum Op {
    PushFront(i32),
    PushBack(i32),
    PopFront,
    PopBack,
    Insert(usize, i32),
    Erase(usize),
    Resize(usize, i32),
    Clear,
    ShrinkToFit,
}

/// Strategy for a single [`Op`], weighted toward pushes so sequences grow.
pub fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::PushFront),
        4 => any::<i32>().prop_map(Op::PushBack),
        2 => Just(Op::PopFront),
        2 => Just(Op::PopBack),
        3 => (any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        3 => any::<usize>().prop_map(Op::Erase),
        1 => (0usize..80, any::<i32>()).prop_map(|(n, v)| Op::Resize(n, v)),
        1 => Just(Op::Clear),
        1 => Just(Op::ShrinkToFit),
    ]
}

/// Strategy for a sequence of up to `max_len` ops.
pub fn arb_ops(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(arb_op(), 0..max_len)
}

/// Apply `op` to both `deque` and `model`, asserting that any returned
/// values agree.
pub fn apply_op<const B: usize>(deque: &mut SegDeque<i32, B>, model: &mut Vec<i32>, op: &Op) {
    match *op {
        Op::PushFront(v) => {
            deque.push_front(v);
            model.insert(0, v);
        }
        Op::PushBack(v) => {
            deque.push_back(v);
            model.push(v);
        }
        Op::PopFront => {
            let expected = if model.is_empty() {
                None
            } else {
                Some(model.remove(0))
            };
            assert_eq!(deque.pop_front(), expected, "pop_front");
        }
        Op::PopBack => {
            assert_eq!(deque.pop_back(), model.pop(), "pop_back");
        }
        Op::Insert(raw, v) => {
            let index = raw % (model.len() + 1);
            deque.insert(index, v);
            model.insert(index, v);
        }
        Op::Erase(raw) => {
            if model.is_empty() {
                assert_eq!(
                    deque.try_erase(raw),
                    Err(DequeError::OutOfRange { index: raw, len: 0 })
                );
            } else {
                let index = raw % model.len();
                assert_eq!(deque.erase(index), model.remove(index), "erase({index})");
            }
        }
        Op::Resize(len, v) => {
            deque.resize(len, v);
            model.resize(len, v);
        }
        Op::Clear => {
            deque.clear();
            model.clear();
        }
        Op::ShrinkToFit => deque.shrink_to_fit(),
    }
}

/// Assert that `deque` holds exactly `model`, checked through every
/// access path, and that its block storage holds an element in every
/// live slot and nowhere else.
pub fn assert_matches<const B: usize>(deque: &SegDeque<i32, B>, model: &[i32]) {
    assert_eq!(deque.len(), model.len(), "len");
    assert_eq!(deque.is_empty(), model.is_empty(), "is_empty");
    assert_eq!(deque.front(), model.first(), "front");
    assert_eq!(deque.back(), model.last(), "back");
    for (index, expected) in model.iter().enumerate() {
        assert_eq!(&deque[index], expected, "index {index}");
        assert_eq!(deque.at(index), Ok(expected), "at({index})");
    }
    assert!(deque.at(model.len()).is_err(), "at(len) must fail");
    assert!(deque.iter().eq(model.iter()), "forward iteration");
    assert!(deque.iter().rev().eq(model.iter().rev()), "reverse iteration");

    if let Err(report) = deque.check_layout() {
        panic!("storage layout broken: {report}");
    }
    let stats = deque.stats();
    assert!(stats.active_blocks <= stats.allocated_blocks);
}
