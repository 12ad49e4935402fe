//! Fisher-Yates shuffle.

use rand::Rng;

/// Shuffle `items` in place into a uniformly random permutation.
///
/// Walks from the last index down to 1 and swaps each element with a
/// uniformly chosen element at an index no greater than its own.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffled copy of `items`.
pub fn shuffled<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut out = items.to_vec();
    shuffle(&mut out, rng);
    out
}
