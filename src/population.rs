//! The `population` module defines the evaluated population the engine
//! carries from one generation to the next and the per-generation statistics
//! handed to observers and termination conditions.

use crate::genetic::Candidate;
use chrono::{DateTime, Duration, Local};

/// A candidate paired with its fitness score. The pair is immutable once
/// constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedCandidate<C>
where
    C: Candidate,
{
    candidate: C,
    fitness: f64,
}

impl<C> EvaluatedCandidate<C>
where
    C: Candidate,
{
    /// Pairs a candidate with its fitness score.
    pub fn new(candidate: C, fitness: f64) -> Self {
        EvaluatedCandidate { candidate, fitness }
    }

    /// Returns the candidate.
    pub fn candidate(&self) -> &C {
        &self.candidate
    }

    /// Returns the fitness score of the candidate.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Unwraps the candidate, discarding the fitness score.
    pub fn into_candidate(self) -> C {
        self.candidate
    }
}

/// An `EvaluatedPopulation` is an ordered list of candidates with their
/// fitness scores.
///
/// After [`sort_by_polarity`](EvaluatedPopulation::sort_by_polarity) has been
/// applied the list is ordered best first: descending fitness for natural
/// scores, ascending fitness for non-natural scores. Members with equal
/// fitness keep the order in which they were constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedPopulation<C>
where
    C: Candidate,
{
    members: Vec<EvaluatedCandidate<C>>,
}

impl<C> EvaluatedPopulation<C>
where
    C: Candidate,
{
    /// Creates a new `EvaluatedPopulation` from the given members.
    pub fn new(members: Vec<EvaluatedCandidate<C>>) -> Self {
        EvaluatedPopulation { members }
    }

    /// Returns all members of this population.
    pub fn members(&self) -> &[EvaluatedCandidate<C>] {
        &self.members
    }

    /// Returns the member at the given index.
    pub fn member(&self, index: usize) -> &EvaluatedCandidate<C> {
        &self.members[index]
    }

    /// Returns the best member of this population. The population must be
    /// sorted; the best member is the first one.
    pub fn best(&self) -> &EvaluatedCandidate<C> {
        &self.members[0]
    }

    /// Returns the number of members in this population.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if this population has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the fitness scores of all members, in member order.
    pub fn fitness_values(&self) -> Vec<f64> {
        self.members.iter().map(EvaluatedCandidate::fitness).collect()
    }

    /// Unwraps the members of this population.
    pub fn into_members(self) -> Vec<EvaluatedCandidate<C>> {
        self.members
    }

    /// Sorts the members best first under the given fitness polarity:
    /// descending fitness when `natural`, ascending otherwise.
    ///
    /// The sort is stable, so members with equal fitness stay in the order
    /// in which they were constructed.
    pub fn sort_by_polarity(&mut self, natural: bool) {
        if natural {
            self.members
                .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        } else {
            self.members
                .sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
        }
    }
}

/// Statistics about one generation, computed once per generation and passed
/// to observers and termination conditions.
///
/// Observers receive the statistics by reference and must not retain them
/// beyond the callback.
#[derive(Clone, Debug, PartialEq)]
pub struct PopulationStats<C>
where
    C: Candidate,
{
    /// The index of the generation these statistics describe. The initial
    /// population has index 0.
    pub generation: u64,
    /// The best candidate of the generation.
    pub best_candidate: C,
    /// The fitness score of the best candidate.
    pub best_fitness: f64,
    /// The arithmetic mean of all fitness scores.
    pub mean_fitness: f64,
    /// The standard deviation of all fitness scores.
    pub fitness_std_dev: f64,
    /// The number of candidates in the population.
    pub population_size: usize,
    /// The number of candidates preserved via elitism.
    pub elite_count: usize,
    /// Whether fitness scores are natural (higher is better).
    pub natural_fitness: bool,
    /// The local time at which the current run started.
    pub started_at: DateTime<Local>,
    /// Wall clock time since the current run started.
    pub elapsed: Duration,
}

impl<C> PopulationStats<C>
where
    C: Candidate,
{
    /// Computes the statistics of a sorted population in one linear pass.
    pub(crate) fn compute(
        evaluated: &EvaluatedPopulation<C>,
        natural: bool,
        elite_count: usize,
        generation: u64,
        started_at: DateTime<Local>,
    ) -> Self {
        let size = evaluated.len();
        let mut sum = 0.;
        let mut sum_of_squares = 0.;
        for member in evaluated.members() {
            let fitness = member.fitness();
            sum += fitness;
            sum_of_squares += fitness * fitness;
        }
        let mean = sum / size as f64;
        let variance = (sum_of_squares / size as f64 - mean * mean).max(0.);
        let best = evaluated.best();
        PopulationStats {
            generation,
            best_candidate: best.candidate().clone(),
            best_fitness: best.fitness(),
            mean_fitness: mean,
            fitness_std_dev: variance.sqrt(),
            population_size: size,
            elite_count,
            natural_fitness: natural,
            started_at,
            elapsed: Local::now().signed_duration_since(started_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population_of(fitness: &[f64]) -> EvaluatedPopulation<u32> {
        EvaluatedPopulation::new(
            fitness
                .iter()
                .enumerate()
                .map(|(index, &fitness)| EvaluatedCandidate::new(index as u32, fitness))
                .collect(),
        )
    }

    #[test]
    fn natural_sort_is_descending() {
        let mut population = population_of(&[3., 10., 7.]);

        population.sort_by_polarity(true);

        assert_eq!(population.fitness_values(), vec![10., 7., 3.]);
        assert_eq!(*population.best().candidate(), 1);
    }

    #[test]
    fn non_natural_sort_is_ascending() {
        let mut population = population_of(&[3., 10., 7.]);

        population.sort_by_polarity(false);

        assert_eq!(population.fitness_values(), vec![3., 7., 10.]);
        assert_eq!(*population.best().candidate(), 0);
    }

    #[test]
    fn sort_breaks_fitness_ties_by_construction_order() {
        let mut population = population_of(&[5., 8., 5., 8.]);

        population.sort_by_polarity(true);

        let candidates: Vec<u32> = population
            .members()
            .iter()
            .map(|member| *member.candidate())
            .collect();
        assert_eq!(candidates, vec![1, 3, 0, 2]);
    }

    #[test]
    fn stats_are_computed_in_one_pass() {
        let mut population = population_of(&[2., 4., 4., 4., 5., 5., 7., 9.]);
        population.sort_by_polarity(true);

        let stats = PopulationStats::compute(&population, true, 2, 7, Local::now());

        assert_eq!(stats.best_fitness, 9.);
        assert_eq!(stats.mean_fitness, 5.);
        assert!((stats.fitness_std_dev - 2.).abs() < 1e-12);
        assert_eq!(stats.population_size, 8);
        assert_eq!(stats.elite_count, 2);
        assert_eq!(stats.generation, 7);
        assert!(stats.natural_fitness);
    }

    #[test]
    fn stats_of_a_single_member_population() {
        let mut population = population_of(&[3.5]);
        population.sort_by_polarity(false);

        let stats = PopulationStats::compute(&population, false, 0, 0, Local::now());

        assert_eq!(stats.best_fitness, 3.5);
        assert_eq!(stats.mean_fitness, 3.5);
        assert_eq!(stats.fitness_std_dev, 0.);
        assert!(!stats.natural_fitness);
    }
}
