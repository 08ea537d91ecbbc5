//! The `genetic` module defines the traits that formulate an optimization
//! or search problem for the evolution engine. Implement these traits to
//! describe the domain specific parts of a problem: how candidate solutions
//! are created and how they are scored.

use crate::{
    error::{Error, ErrorKind},
    random::Prng,
};
use std::fmt::Debug;

/// A `Candidate` is one possible solution of the optimization or search
/// problem. The engine never inspects the internals of a candidate; it only
/// passes candidates through the variation operators and the fitness
/// evaluator.
///
/// The trait is implemented for every type that satisfies its bounds, so any
/// cloneable, printable and thread-safe type can be evolved.
pub trait Candidate: Clone + Debug + Send + Sync + 'static {}

impl<T> Candidate for T where T: Clone + Debug + Send + Sync + 'static {}

/// A `CandidateFactory` creates the candidates an initial population is
/// made of.
pub trait CandidateFactory<C>
where
    C: Candidate,
{
    /// Creates one new candidate, typically at random.
    fn random_candidate(&self, rng: &mut Prng) -> C;

    /// Creates a population of exactly `size` candidates, seeded with the
    /// given candidates.
    ///
    /// The first `seeds.len()` slots of the returned population are the
    /// seeds in the order given. The remaining slots are filled with freshly
    /// created candidates.
    ///
    /// Fails with [`ErrorKind::InvalidArgument`] when more seeds are given
    /// than the population can hold. No partial population is produced.
    fn seed_population(
        &self,
        size: usize,
        seeds: Vec<C>,
        rng: &mut Prng,
    ) -> Result<Vec<C>, Error> {
        if seeds.len() > size {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!(
                    "too many seed candidates: got {} seeds for a population of size {}",
                    seeds.len(),
                    size
                ),
            ));
        }
        let mut population = seeds;
        population.reserve(size - population.len());
        while population.len() < size {
            population.push(self.random_candidate(rng));
        }
        Ok(population)
    }
}

/// A `FitnessEvaluator` assigns a fitness score to a candidate.
///
/// Fitness scores must be finite and non-negative. Whether a higher score
/// means a fitter candidate depends on [`FitnessEvaluator::is_natural`].
///
/// When the engine runs with parallel evaluation the `fitness` function is
/// called concurrently from multiple worker threads, so implementations must
/// synchronize any access to shared mutable state.
pub trait FitnessEvaluator<C>: Send + Sync
where
    C: Candidate,
{
    /// Calculates the fitness score of the given candidate.
    ///
    /// `population` is the generation the candidate belongs to, including
    /// the candidate itself. It is provided read-only so evaluators that
    /// score individuals in the context of their peers can consult it;
    /// simple evaluators ignore it. Candidates must not be mutated through
    /// this view.
    fn fitness(&self, candidate: &C, population: &[C]) -> f64;

    /// Specifies whether this evaluator produces natural fitness scores.
    ///
    /// Natural scores are maximized: the fittest candidate has the highest
    /// score. Non-natural scores are minimized, fitness being interpreted as
    /// a cost. The value must not change over the lifetime of an engine.
    fn is_natural(&self) -> bool;
}

/// An adapter to allow the use of ordinary functions and closures as fitness
/// evaluators.
///
/// ```
/// use evogen::genetic::{FitnessEvaluator, FitnessFn};
///
/// let evaluator = FitnessFn::natural(|candidate: &Vec<bool>, _: &[Vec<bool>]| {
///     candidate.iter().filter(|&&bit| bit).count() as f64
/// });
/// assert!(evaluator.is_natural());
/// assert_eq!(evaluator.fitness(&vec![true, false, true], &[]), 2.);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FitnessFn<F> {
    function: F,
    natural: bool,
}

impl<F> FitnessFn<F> {
    /// Wraps a function as an evaluator with naturally ordered scores
    /// (higher is better).
    pub fn natural(function: F) -> Self {
        FitnessFn {
            function,
            natural: true,
        }
    }

    /// Wraps a function as an evaluator with non-naturally ordered scores
    /// (lower is better).
    pub fn non_natural(function: F) -> Self {
        FitnessFn {
            function,
            natural: false,
        }
    }
}

impl<C, F> FitnessEvaluator<C> for FitnessFn<F>
where
    C: Candidate,
    F: Fn(&C, &[C]) -> f64 + Send + Sync,
{
    fn fitness(&self, candidate: &C, population: &[C]) -> f64 {
        (self.function)(candidate, population)
    }

    fn is_natural(&self) -> bool {
        self.natural
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{get_rng, random_seed};

    #[derive(Clone, Debug, PartialEq)]
    struct ZeroFactory;

    impl CandidateFactory<i32> for ZeroFactory {
        fn random_candidate(&self, _: &mut Prng) -> i32 {
            0
        }
    }

    #[test]
    fn seed_population_puts_seeds_first_in_order() {
        let mut rng = get_rng(random_seed());

        let population = ZeroFactory
            .seed_population(5, vec![3, 1, 2], &mut rng)
            .unwrap();

        assert_eq!(population, vec![3, 1, 2, 0, 0]);
    }

    #[test]
    fn seed_population_with_exactly_size_seeds() {
        let mut rng = get_rng(random_seed());

        let population = ZeroFactory
            .seed_population(3, vec![7, 8, 9], &mut rng)
            .unwrap();

        assert_eq!(population, vec![7, 8, 9]);
    }

    #[test]
    fn seed_population_rejects_too_many_seeds() {
        let mut rng = get_rng(random_seed());

        let result = ZeroFactory.seed_population(2, vec![1, 2, 3], &mut rng);

        let error = result.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        assert!(error.message().contains("too many seed candidates"));
    }
}
