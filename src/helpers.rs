/*
 * Helpers extracted from the solutions.
 * Example import from this file: `use advent_of_code_2022::helpers::Itertools;`.
 */

pub mod parse;

use std::cmp::Reverse;
use std::collections::BinaryHeap;

pub trait Itertools: Iterator {
    /// Returns the `n` largest items, largest first.
    ///
    /// Keeps at most `n` items around; the smallest of them is evicted
    /// whenever a larger one shows up.
    fn max_n(self, n: usize) -> Vec<Self::Item>
    where
        Self::Item: Ord,
        Self: Sized,
    {
        if n == 0 {
            return Vec::new();
        }

        let mut kept = BinaryHeap::with_capacity(n + 1);
        for elt in self {
            kept.push(Reverse(elt));
            if kept.len() > n {
                kept.pop();
            }
        }

        // Ascending `Reverse`s are descending items.
        kept.into_sorted_vec()
            .into_iter()
            .map(|Reverse(elt)| elt)
            .collect()
    }
}

impl<I: Iterator> Itertools for I {}

/// Borrows two distinct elements of `slice` mutably at once.
///
/// Returns `None` if `a == b` or either index is out of bounds.
pub fn slice_pair_mut<T>(slice: &mut [T], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
    if a == b || a >= slice.len() || b >= slice.len() {
        return None;
    }

    if a < b {
        let (low, high) = slice.split_at_mut(b);
        Some((&mut low[a], &mut high[0]))
    } else {
        let (low, high) = slice.split_at_mut(a);
        Some((&mut high[0], &mut low[b]))
    }
}
