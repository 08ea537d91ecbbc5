//! The `rank` module provides selection on rank-derived scores.

use crate::{
    genetic::Candidate,
    population::EvaluatedPopulation,
    random::Prng,
    selection::{FitnessWheel, SelectionStrategy},
};

/// The `RankSelector` replaces the fitness scores by rank-derived scores
/// before running fitness proportionate selection on them.
///
/// The best ranked candidate always receives the highest score, independent
/// of how far the numeric fitness values are spread. This keeps the
/// selection pressure stable when a few outliers dominate the raw scores.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RankSelector;

impl RankSelector {
    pub fn new() -> Self {
        RankSelector
    }
}

impl<C> SelectionStrategy<C> for RankSelector
where
    C: Candidate,
{
    fn select(
        &self,
        evaluated: &EvaluatedPopulation<C>,
        _natural: bool,
        count: usize,
        rng: &mut Prng,
    ) -> Vec<C> {
        // the population is sorted best first, so rank 0 is the best; its
        // score is the population size, the worst rank scores 1
        let size = evaluated.len();
        let scores: Vec<f64> = (0..size).map(|rank| (size - rank) as f64).collect();
        let wheel = FitnessWheel::with_polarity(&scores, true);
        (0..count)
            .map(|_| evaluated.member(wheel.spin(rng)).candidate().clone())
            .collect()
    }
}
