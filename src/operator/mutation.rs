//! The `mutation` module provides the built-in mutation operators. All of
//! them act on each selected candidate in isolation and draw their variation
//! parameters from pluggable [`generator`](crate::generator)s.

use crate::{
    error::Error,
    factory::ascii_alphabet,
    generator::{IntGenerator, ProbabilityGenerator},
    operator::EvolutionaryOperator,
    random::{random_index, random_probability, Prng},
};
use fixedbitset::FixedBitSet;
use std::fmt::Debug;

/// The `BitFlipMutation` operator flips each bit of a bit string candidate
/// with the probability drawn from its probability generator.
///
/// The probability is drawn once per candidate and applied per bit.
#[derive(Debug)]
pub struct BitFlipMutation {
    probability: Box<dyn ProbabilityGenerator>,
}

impl BitFlipMutation {
    pub fn new(probability: impl ProbabilityGenerator + 'static) -> Self {
        BitFlipMutation {
            probability: Box::new(probability),
        }
    }
}

impl EvolutionaryOperator<FixedBitSet> for BitFlipMutation {
    fn apply(&self, selection: Vec<FixedBitSet>, rng: &mut Prng) -> Vec<FixedBitSet> {
        selection
            .into_iter()
            .map(|genome| {
                let probability = self.probability.next_probability(rng);
                let mut mutated = genome;
                for bit in 0..mutated.len() {
                    if random_probability(rng) < probability {
                        let value = mutated.contains(bit);
                        mutated.set(bit, !value);
                    }
                }
                mutated
            })
            .collect()
    }
}

/// The `StringMutation` operator replaces each character of a string
/// candidate, with the probability drawn from its probability generator, by
/// a random character from its alphabet.
///
/// The probability is drawn once per candidate and applied per character.
#[derive(Debug)]
pub struct StringMutation {
    alphabet: Vec<char>,
    probability: Box<dyn ProbabilityGenerator>,
}

impl StringMutation {
    /// Creates a new `StringMutation` operator resampling characters from
    /// the given alphabet.
    ///
    /// Fails with [`InvalidArgument`](crate::error::ErrorKind::InvalidArgument)
    /// when the alphabet is empty or contains non-ASCII characters.
    pub fn new(
        alphabet: &str,
        probability: impl ProbabilityGenerator + 'static,
    ) -> Result<Self, Error> {
        Ok(StringMutation {
            alphabet: ascii_alphabet(alphabet)?,
            probability: Box::new(probability),
        })
    }
}

impl EvolutionaryOperator<String> for StringMutation {
    fn apply(&self, selection: Vec<String>, rng: &mut Prng) -> Vec<String> {
        selection
            .into_iter()
            .map(|genome| {
                let probability = self.probability.next_probability(rng);
                genome
                    .chars()
                    .map(|original| {
                        if random_probability(rng) < probability {
                            self.alphabet[random_index(rng, self.alphabet.len())]
                        } else {
                            original
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// The `ListOrderMutation` operator reorders the elements of a list
/// candidate instead of modifying them: one mutation swaps a random element
/// with the element a drawn distance after it (wrapping around the end).
///
/// How many mutations are applied to a candidate and how far each swap
/// reaches are drawn from the two integer generators, typically Poisson
/// distributed. Since the elements themselves are never changed, the output
/// is always a permutation of the input.
#[derive(Debug)]
pub struct ListOrderMutation {
    count: Box<dyn IntGenerator>,
    amount: Box<dyn IntGenerator>,
}

impl ListOrderMutation {
    /// Creates a new `ListOrderMutation` drawing the number of mutations
    /// per candidate from `count` and the swap distance from `amount`.
    pub fn new(
        count: impl IntGenerator + 'static,
        amount: impl IntGenerator + 'static,
    ) -> Self {
        ListOrderMutation {
            count: Box::new(count),
            amount: Box::new(amount),
        }
    }
}

impl<V> EvolutionaryOperator<Vec<V>> for ListOrderMutation
where
    V: Clone + Debug + PartialEq + Send + Sync + 'static,
{
    fn apply(&self, selection: Vec<Vec<V>>, rng: &mut Prng) -> Vec<Vec<V>> {
        selection
            .into_iter()
            .map(|genome| {
                let length = genome.len();
                if length == 0 {
                    return genome;
                }
                let mut mutated = genome;
                let count = self.count.next_value(rng);
                for _ in 0..count {
                    let start = random_index(rng, length);
                    // an amount of 0 swaps an element with itself, which is
                    // a harmless no-op
                    let amount = self.amount.next_value(rng) as usize;
                    let end = (start + amount) % length;
                    mutated.swap(start, end);
                }
                mutated
            })
            .collect()
    }
}
