//! Display-order generation over the selected subset.

use rand::Rng;

/// Produce a traversal over `n` selection indices.
///
/// Sequential mode returns the identity `[0, n)`. Randomized mode applies a
/// Fisher-Yates shuffle, so every one of the `n!` permutations is equally
/// likely. Draws randomness from the thread-local generator; use
/// [`generate_with`] for a caller-controlled RNG.
#[must_use]
pub fn generate(n: usize, randomize: bool) -> Vec<usize> {
    generate_with(n, randomize, &mut rand::rng())
}

/// Same as [`generate`] with an explicit RNG, so seeded runs are reproducible.
#[must_use]
pub fn generate_with<R: Rng + ?Sized>(n: usize, randomize: bool, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    if randomize {
        for i in (1..n).rev() {
            let j = rng.random_range(0..=i);
            order.swap(i, j);
        }
    }
    order
}

/// Find the order position holding `image_index`, if any.
///
/// Used after a live reshuffle so playback continues from the image already
/// on screen instead of jumping.
#[must_use]
pub fn locate(order: &[usize], image_index: usize) -> Option<usize> {
    order.iter().position(|&idx| idx == image_index)
}
