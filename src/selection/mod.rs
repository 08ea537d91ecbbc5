//! The `selection` module defines the strategy for picking the parents of
//! the next generation and provides the built-in strategies:
//!
//! * [`RouletteWheelSelector`](proportionate::RouletteWheelSelector) -
//!   fitness proportionate selection, one wheel spin per parent.
//! * [`UniversalSamplingSelector`](proportionate::UniversalSamplingSelector) -
//!   fitness proportionate selection with equally spaced pointers, lower
//!   variance than repeated roulette spins.
//! * [`TournamentSelector`](tournament::TournamentSelector) - binary
//!   tournaments decided with a configurable probability.
//! * [`RankSelector`](rank::RankSelector) - fitness proportionate selection
//!   on rank-derived scores, independent of the numeric fitness spread.

pub mod proportionate;
pub mod rank;
pub mod tournament;

pub use self::{
    proportionate::{RouletteWheelSelector, UniversalSamplingSelector},
    rank::RankSelector,
    tournament::TournamentSelector,
};

use crate::{genetic::Candidate, population::EvaluatedPopulation, random::Prng};
use std::fmt::Debug;

/// A `SelectionStrategy` picks the candidates that become the parents of
/// the next generation.
///
/// Selection is done with replacement: the same candidate may appear several
/// times in the returned list. The population handed to `select` is sorted
/// best first, so strategies may rely on a smaller index meaning a fitter
/// candidate; when two candidates share a fitness score, the one earlier in
/// the list wins.
pub trait SelectionStrategy<C>: Debug
where
    C: Candidate,
{
    /// Selects `count` parents from the given evaluated population.
    ///
    /// `natural` is the fitness polarity of the evaluator driving the
    /// evolution: `true` when higher scores are better.
    fn select(
        &self,
        evaluated: &EvaluatedPopulation<C>,
        natural: bool,
        count: usize,
        rng: &mut Prng,
    ) -> Vec<C>;
}

/// Weight given to a fitness score of zero so that every candidate keeps a
/// minimal share of the wheel.
const ZERO_FITNESS_WEIGHT: f64 = 1e-9;

/// A cumulative fitness wheel for fitness proportionate selection.
///
/// For non-natural scores each fitness `f` is transformed to
/// `max + min - f`, so that a larger share of the wheel always means a
/// fitter candidate. Scores of zero are replaced by a tiny weight.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FitnessWheel {
    cumulative: Vec<f64>,
}

impl FitnessWheel {
    pub(crate) fn with_polarity(fitness: &[f64], natural: bool) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &f in fitness {
            min = min.min(f);
            max = max.max(f);
        }
        let mut cumulative = Vec::with_capacity(fitness.len());
        let mut total = 0.;
        for &f in fitness {
            let mut weight = if natural { f } else { max + min - f };
            if weight <= 0. {
                weight = ZERO_FITNESS_WEIGHT;
            }
            total += weight;
            cumulative.push(total);
        }
        FitnessWheel { cumulative }
    }

    /// The sum of all weights on the wheel.
    pub(crate) fn total(&self) -> f64 {
        *self.cumulative.last().expect("empty fitness wheel")
    }

    /// Returns the index the given pointer lands on. The pointer must be in
    /// `[0, total)`; pointers beyond the wheel fall on the last index.
    pub(crate) fn index_of(&self, pointer: f64) -> usize {
        let index = self.cumulative.partition_point(|&weight| weight <= pointer);
        index.min(self.cumulative.len() - 1)
    }

    /// Draws one uniform pointer and returns the index it lands on.
    pub(crate) fn spin(&self, rng: &mut Prng) -> usize {
        self.index_of(crate::random::random_probability(rng) * self.total())
    }
}
