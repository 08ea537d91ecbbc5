//! The `random` module defines the pseudo random number generator used by
//! the engine and a handful of helper functions shared by the selection
//! strategies and the variation operators.
//!
//! Every stochastic decision of the engine, the operators, the selectors and
//! the candidate factories draws from one `Prng` instance owned by the
//! engine. For a fixed seed and single-threaded evaluation the trajectory of
//! a run is therefore reproducible.

pub use rand::{Rng, SeedableRng};

use rand_xoshiro::Xoshiro256PlusPlus;

/// The PRNG used by the evolution engine.
pub type Prng = Xoshiro256PlusPlus;

/// The seed for the `Prng`.
pub type Seed = [u8; 32];

/// Creates a new `Prng` initialized with the given seed.
pub fn get_rng(seed: Seed) -> Prng {
    Prng::from_seed(seed)
}

/// Generates a random seed from entropy.
pub fn random_seed() -> Seed {
    rand::thread_rng().gen()
}

/// Picks a random index in the range `0..length`.
pub fn random_index<R>(rng: &mut R, length: usize) -> usize
where
    R: Rng + Sized,
{
    rng.gen_range(0..length)
}

/// Draws a probability value in the half open interval `[0, 1)`.
pub fn random_probability<R>(rng: &mut R) -> f64
where
    R: Rng + Sized,
{
    rng.gen::<f64>()
}

/// Picks two distinct cut points within `0..length`, returned in ascending
/// order. The distance between the two cut points is always smaller than
/// `length - 2`.
pub fn random_cut_points<R>(rng: &mut R, length: usize) -> (usize, usize)
where
    R: Rng + Sized,
{
    assert!(length >= 4);
    let max_slice = length - 2;
    loop {
        let cutpoint1 = rng.gen_range(0..length);
        let cutpoint2 = rng.gen_range(0..length);
        if cutpoint1 < cutpoint2 {
            if cutpoint2 - cutpoint1 >= max_slice {
                continue;
            }
            return (cutpoint1, cutpoint2);
        } else if cutpoint2 < cutpoint1 {
            if cutpoint1 - cutpoint2 >= max_slice {
                continue;
            }
            return (cutpoint2, cutpoint1);
        }
    }
}

/// Picks `n` distinct cut points within `1..length`, returned in ascending
/// order. The genome length must be at least `2 * n`.
pub fn random_n_cut_points<R>(rng: &mut R, n: usize, length: usize) -> Vec<usize>
where
    R: Rng + Sized,
{
    assert!(n > 0);
    assert!(length >= 2 * n);
    let mut cutpoints = Vec::with_capacity(n);
    match n {
        1 => {
            cutpoints.push(rng.gen_range(1..length));
        }
        _ => {
            let slice_len = length / n;
            let mut start = 0;
            let mut end = slice_len;
            let mut count = 1;
            loop {
                let cutpoint = rng.gen_range(start..end);
                if cutpoint == 0 || cutpoint == length {
                    continue;
                }
                cutpoints.push(cutpoint);
                count += 1;
                if count > n {
                    break;
                }
                start = cutpoint + 1;
                if count == n {
                    end = length;
                } else {
                    end += slice_len;
                }
            }
        }
    }
    cutpoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {

        #[test]
        fn random_cut_points_are_ordered_and_in_range(length in 4usize..500) {
            let mut rng = get_rng(random_seed());

            let (cutpoint1, cutpoint2) = random_cut_points(&mut rng, length);

            prop_assert!(cutpoint1 < cutpoint2);
            prop_assert!(cutpoint2 < length);
            prop_assert!(cutpoint2 - cutpoint1 < length - 2);
        }

        #[test]
        fn random_n_cut_points_are_strictly_ascending(
            n in 1usize..8,
            extra in 0usize..100,
        ) {
            let length = 2 * n + extra;
            let mut rng = get_rng(random_seed());

            let cutpoints = random_n_cut_points(&mut rng, n, length);

            prop_assert_eq!(cutpoints.len(), n);
            for window in cutpoints.windows(2) {
                prop_assert!(window[0] < window[1]);
            }
            for &cutpoint in &cutpoints {
                prop_assert!(cutpoint >= 1 && cutpoint < length);
            }
        }
    }

    #[test]
    #[should_panic(expected = "length >= 4")]
    fn random_cut_points_rejects_too_short_genomes() {
        random_cut_points(&mut get_rng(random_seed()), 3);
    }

    #[test]
    #[should_panic(expected = "n > 0")]
    fn random_n_cut_points_rejects_zero_points() {
        random_n_cut_points(&mut get_rng(random_seed()), 0, 4);
    }

    #[test]
    #[should_panic(expected = "length >= 2 * n")]
    fn random_n_cut_points_rejects_too_short_genomes() {
        random_n_cut_points(&mut get_rng(random_seed()), 3, 4);
    }

    #[test]
    fn same_seed_produces_same_stream() {
        let seed = random_seed();
        let mut rng1 = get_rng(seed);
        let mut rng2 = get_rng(seed);

        for _ in 0..100 {
            assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
        }
    }
}
