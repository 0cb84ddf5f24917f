//! Shared randomness helpers
//!
//! Every selection site in the workspace goes through these two functions,
//! so uniformity is audited in one place: `shuffled` is an unbiased
//! Fisher-Yates permutation, `pick` a uniform draw over the slice.

use rand::prelude::*;

/// Shuffle a vec in place and return it (every permutation equally likely)
pub fn shuffled<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    items.shuffle(rng);
    items
}

/// Pick one element uniformly at random, `None` on an empty slice
pub fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}
