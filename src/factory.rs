//! The `factory` module provides candidate factories for common candidate
//! representations: bit strings, ASCII strings and permutations.
//!
//! All factories implement [`CandidateFactory`], so they can seed an initial
//! population via
//! [`seed_population`](crate::genetic::CandidateFactory::seed_population).

use crate::{
    error::{Error, ErrorKind},
    genetic::CandidateFactory,
    random::{random_index, Prng, Rng},
};
use fixedbitset::FixedBitSet;
use rand::seq::SliceRandom;

/// Validates an alphabet for string candidates: it must be non-empty and
/// all-ASCII.
pub(crate) fn ascii_alphabet(alphabet: &str) -> Result<Vec<char>, Error> {
    if alphabet.is_empty() {
        return Err(Error::new(
            ErrorKind::InvalidArgument,
            "alphabet must not be empty",
        ));
    }
    if !alphabet.is_ascii() {
        return Err(Error::new(
            ErrorKind::InvalidArgument,
            format!("alphabet {:?} must only contain ASCII characters", alphabet),
        ));
    }
    Ok(alphabet.chars().collect())
}

/// A factory for random bit strings of a fixed length.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BitStringFactory {
    length: usize,
}

impl BitStringFactory {
    pub fn new(length: usize) -> Self {
        BitStringFactory { length }
    }
}

impl CandidateFactory<FixedBitSet> for BitStringFactory {
    fn random_candidate(&self, rng: &mut Prng) -> FixedBitSet {
        let mut bits = FixedBitSet::with_capacity(self.length);
        for bit in 0..self.length {
            bits.set(bit, rng.gen());
        }
        bits
    }
}

/// A factory for random strings of a fixed length with characters taken
/// from an ASCII alphabet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AsciiStringFactory {
    alphabet: Vec<char>,
    length: usize,
}

impl AsciiStringFactory {
    /// Creates a factory producing strings of the given length from the
    /// given alphabet.
    ///
    /// Fails with [`ErrorKind::InvalidArgument`] when the alphabet is empty
    /// or contains non-ASCII characters.
    pub fn new(alphabet: &str, length: usize) -> Result<Self, Error> {
        Ok(AsciiStringFactory {
            alphabet: ascii_alphabet(alphabet)?,
            length,
        })
    }
}

impl CandidateFactory<String> for AsciiStringFactory {
    fn random_candidate(&self, rng: &mut Prng) -> String {
        (0..self.length)
            .map(|_| self.alphabet[random_index(rng, self.alphabet.len())])
            .collect()
    }
}

/// A factory for random permutations of the integers `0..length`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PermutationFactory {
    length: usize,
}

impl PermutationFactory {
    pub fn new(length: usize) -> Self {
        PermutationFactory { length }
    }
}

impl CandidateFactory<Vec<usize>> for PermutationFactory {
    fn random_candidate(&self, rng: &mut Prng) -> Vec<usize> {
        let mut permutation: Vec<usize> = (0..self.length).collect();
        permutation.shuffle(rng);
        permutation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{get_rng, random_seed};

    #[test]
    fn bit_string_factory_produces_the_configured_length() {
        let mut rng = get_rng(random_seed());
        let factory = BitStringFactory::new(20);

        for _ in 0..10 {
            assert_eq!(factory.random_candidate(&mut rng).len(), 20);
        }
    }

    #[test]
    fn ascii_string_factory_samples_only_from_its_alphabet() {
        let mut rng = get_rng(random_seed());
        let factory = AsciiStringFactory::new("ABC", 11).unwrap();

        for _ in 0..10 {
            let candidate = factory.random_candidate(&mut rng);
            assert_eq!(candidate.len(), 11);
            assert!(candidate.chars().all(|c| "ABC".contains(c)));
        }
    }

    #[test]
    fn ascii_string_factory_rejects_an_empty_alphabet() {
        let error = AsciiStringFactory::new("", 5).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn ascii_string_factory_rejects_a_non_ascii_alphabet() {
        let error = AsciiStringFactory::new("äöü", 5).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn permutation_factory_produces_permutations() {
        let mut rng = get_rng(random_seed());
        let factory = PermutationFactory::new(10);

        for _ in 0..20 {
            let mut candidate = factory.random_candidate(&mut rng);
            candidate.sort_unstable();
            assert_eq!(candidate, (0..10).collect::<Vec<usize>>());
        }
    }

    #[test]
    fn seeded_population_keeps_seeds_in_their_slots() {
        let mut rng = get_rng(random_seed());
        let factory = PermutationFactory::new(4);
        let seeds = vec![vec![3, 2, 1, 0], vec![0, 1, 2, 3]];

        let population = factory.seed_population(6, seeds.clone(), &mut rng).unwrap();

        assert_eq!(population.len(), 6);
        assert_eq!(population[0], seeds[0]);
        assert_eq!(population[1], seeds[1]);
    }
}
