//! The `proportionate` module provides the fitness proportionate selection
//! strategies. Each candidate's share of the wheel is proportional to its
//! fitness score, adjusted for polarity so that fitter candidates always
//! hold a larger share.

use crate::{
    genetic::Candidate,
    population::EvaluatedPopulation,
    random::{random_probability, Prng},
    selection::{FitnessWheel, SelectionStrategy},
};

/// The `RouletteWheelSelector` implements stochastic fitness proportionate
/// selection. For every parent one uniform pointer is drawn and resolved
/// against the cumulative fitness wheel with a binary search.
///
/// Characteristics: no bias, does not guarantee minimal spread.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RouletteWheelSelector;

impl RouletteWheelSelector {
    pub fn new() -> Self {
        RouletteWheelSelector
    }
}

impl<C> SelectionStrategy<C> for RouletteWheelSelector
where
    C: Candidate,
{
    fn select(
        &self,
        evaluated: &EvaluatedPopulation<C>,
        natural: bool,
        count: usize,
        rng: &mut Prng,
    ) -> Vec<C> {
        let wheel = FitnessWheel::with_polarity(&evaluated.fitness_values(), natural);
        (0..count)
            .map(|_| evaluated.member(wheel.spin(rng)).candidate().clone())
            .collect()
    }
}

/// The `UniversalSamplingSelector` implements stochastic universal sampling.
///
/// A single uniform draw produces `count` equally spaced pointers around the
/// wheel, so the number of times a candidate is selected can differ from its
/// expected share by at most one.
///
/// Characteristics: no bias, minimal spread.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UniversalSamplingSelector;

impl UniversalSamplingSelector {
    pub fn new() -> Self {
        UniversalSamplingSelector
    }
}

impl<C> SelectionStrategy<C> for UniversalSamplingSelector
where
    C: Candidate,
{
    fn select(
        &self,
        evaluated: &EvaluatedPopulation<C>,
        natural: bool,
        count: usize,
        rng: &mut Prng,
    ) -> Vec<C> {
        if count == 0 {
            return Vec::new();
        }
        let wheel = FitnessWheel::with_polarity(&evaluated.fitness_values(), natural);
        let spacing = wheel.total() / count as f64;
        let start = random_probability(rng) * spacing;
        (0..count)
            .map(|pointer| {
                let index = wheel.index_of(start + pointer as f64 * spacing);
                evaluated.member(index).candidate().clone()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        population::EvaluatedCandidate,
        random::{get_rng, random_seed},
    };
    use proptest::prelude::*;

    fn population_of(fitness: &[f64]) -> EvaluatedPopulation<usize> {
        EvaluatedPopulation::new(
            fitness
                .iter()
                .enumerate()
                .map(|(index, &fitness)| EvaluatedCandidate::new(index, fitness))
                .collect(),
        )
    }

    proptest! {

        #[test]
        fn roulette_returns_count_members_of_the_population(
            count in 0usize..50,
            fitness in proptest::collection::vec(0f64..100., 1..30),
        ) {
            let population = population_of(&fitness);
            let mut rng = get_rng(random_seed());

            let selection = RouletteWheelSelector::new()
                .select(&population, true, count, &mut rng);

            prop_assert_eq!(selection.len(), count);
            for parent in selection {
                prop_assert!(parent < fitness.len());
            }
        }

        #[test]
        fn universal_sampling_returns_count_members_of_the_population(
            count in 0usize..50,
            fitness in proptest::collection::vec(0f64..100., 1..30),
        ) {
            let population = population_of(&fitness);
            let mut rng = get_rng(random_seed());

            let selection = UniversalSamplingSelector::new()
                .select(&population, false, count, &mut rng);

            prop_assert_eq!(selection.len(), count);
            for parent in selection {
                prop_assert!(parent < fitness.len());
            }
        }
    }

    #[test]
    fn roulette_prefers_fit_candidates() {
        // candidate 1 holds 90% of the wheel
        let population = population_of(&[10., 90.]);
        let mut rng = get_rng([7; 32]);

        let selection =
            RouletteWheelSelector::new().select(&population, true, 10_000, &mut rng);
        let fit_count = selection.iter().filter(|&&parent| parent == 1).count();

        let share = fit_count as f64 / 10_000.;
        assert!((share - 0.9).abs() < 0.02, "share of the fitter was {}", share);
    }

    #[test]
    fn roulette_inverts_shares_for_non_natural_fitness() {
        // transformed weights: 100 - f => 90 for candidate 0, 10 for candidate 1
        let population = population_of(&[10., 90.]);
        let mut rng = get_rng([7; 32]);

        let selection =
            RouletteWheelSelector::new().select(&population, false, 10_000, &mut rng);
        let cheap_count = selection.iter().filter(|&&parent| parent == 0).count();

        let share = cheap_count as f64 / 10_000.;
        assert!((share - 0.9).abs() < 0.02, "share of the cheaper was {}", share);
    }

    #[test]
    fn universal_sampling_covers_candidates_with_a_full_share() {
        // every candidate holds 1/4 of the wheel and 4 parents are drawn, so
        // each one must be selected at least once
        let population = population_of(&[25., 25., 25., 25.]);

        for _ in 0..50 {
            let mut rng = get_rng(random_seed());
            let mut selection = UniversalSamplingSelector::new()
                .select(&population, true, 4, &mut rng);
            selection.sort_unstable();
            assert_eq!(selection, vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn universal_sampling_never_overselects_small_shares() {
        let population = population_of(&[60., 20., 10., 10.]);
        let mut rng = get_rng([21; 32]);

        let selection = UniversalSamplingSelector::new()
            .select(&population, true, 10, &mut rng);

        // expected counts: 6, 2, 1, 1 with a spread of at most one
        let count_of = |candidate: usize| {
            selection
                .iter()
                .filter(|&&parent| parent == candidate)
                .count() as i64
        };
        assert!((count_of(0) - 6).abs() <= 1);
        assert!((count_of(1) - 2).abs() <= 1);
        assert!((count_of(2) - 1).abs() <= 1);
        assert!((count_of(3) - 1).abs() <= 1);
    }
}
