//! The `termination` module defines when the evolution stops.
//!
//! The engine evaluates every condition at each generation boundary. A run
//! ends as soon as at least one condition is satisfied; the engine records
//! every condition that fired, in the order the conditions were passed to
//! the `evolve*` call.
//!
//! The provided conditions are:
//!
//! * [`TargetFitness`] - stop once the best fitness reaches a target value.
//! * [`GenerationCount`] - stop after a number of generations.
//! * [`ElapsedTime`] - stop once the run has lasted for a given duration.
//! * [`UserAbort`] - stop when an external abort signal has been raised.

use crate::{genetic::Candidate, population::PopulationStats};
use chrono::Duration;
use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

/// A `TerminationCondition` decides whether the evolution should stop,
/// based purely on the statistics of the current generation.
pub trait TerminationCondition<C>: Debug
where
    C: Candidate,
{
    /// Returns `true` if the evolution should terminate.
    fn should_terminate(&self, stats: &PopulationStats<C>) -> bool;
}

/// The `TargetFitness` condition stops the evolution once a candidate with
/// a given fitness has been found: under natural polarity once the best
/// fitness is at least the target, under non-natural polarity once it is at
/// most the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetFitness {
    target: f64,
    natural: bool,
}

impl TargetFitness {
    /// A target for naturally ordered fitness scores (higher is better).
    pub fn natural(target: f64) -> Self {
        TargetFitness {
            target,
            natural: true,
        }
    }

    /// A target for non-naturally ordered fitness scores (lower is better).
    pub fn non_natural(target: f64) -> Self {
        TargetFitness {
            target,
            natural: false,
        }
    }

    /// Returns the fitness value that stops the evolution when reached.
    pub fn target(&self) -> f64 {
        self.target
    }
}

impl<C> TerminationCondition<C> for TargetFitness
where
    C: Candidate,
{
    fn should_terminate(&self, stats: &PopulationStats<C>) -> bool {
        if self.natural {
            stats.best_fitness >= self.target
        } else {
            stats.best_fitness <= self.target
        }
    }
}

/// The `GenerationCount` condition stops the evolution after the given
/// number of generations has been processed. The initial population counts
/// as the first generation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GenerationCount {
    generations: u64,
}

impl GenerationCount {
    pub fn new(generations: u64) -> Self {
        GenerationCount { generations }
    }

    pub fn generations(&self) -> u64 {
        self.generations
    }
}

impl<C> TerminationCondition<C> for GenerationCount
where
    C: Candidate,
{
    fn should_terminate(&self, stats: &PopulationStats<C>) -> bool {
        // generation indices are 0-based
        stats.generation + 1 >= self.generations
    }
}

/// The `ElapsedTime` condition stops the evolution once the run has been
/// going on for the given duration. It is checked at generation boundaries
/// only, so a run lasts at least until the generation in flight completes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ElapsedTime {
    duration: Duration,
}

impl ElapsedTime {
    pub fn new(duration: Duration) -> Self {
        ElapsedTime { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl<C> TerminationCondition<C> for ElapsedTime
where
    C: Candidate,
{
    fn should_terminate(&self, stats: &PopulationStats<C>) -> bool {
        stats.elapsed >= self.duration
    }
}

/// The `UserAbort` condition stops the evolution when an external abort
/// signal has been raised through its [`AbortHandle`].
///
/// The handle can be cloned and passed to another thread, e.g. a signal
/// handler or a UI callback. The abort fires at the next generation
/// boundary; an in-flight evaluation batch is not interrupted.
#[derive(Clone, Debug, Default)]
pub struct UserAbort {
    aborted: Arc<AtomicBool>,
}

impl UserAbort {
    pub fn new() -> Self {
        UserAbort {
            aborted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns a handle that raises the abort signal of this condition.
    pub fn handle(&self) -> AbortHandle {
        AbortHandle {
            aborted: Arc::clone(&self.aborted),
        }
    }

    /// Returns `true` if the abort signal has been raised.
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }

    /// Clears the abort signal so the condition can be used for another
    /// run.
    pub fn reset(&self) {
        self.aborted.store(false, Ordering::Release);
    }
}

impl<C> TerminationCondition<C> for UserAbort
where
    C: Candidate,
{
    fn should_terminate(&self, _: &PopulationStats<C>) -> bool {
        self.is_aborted()
    }
}

/// Raises the abort signal of the [`UserAbort`] condition it was created
/// from.
#[derive(Clone, Debug)]
pub struct AbortHandle {
    aborted: Arc<AtomicBool>,
}

impl AbortHandle {
    /// Signals the engine to stop at the next generation boundary.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::{EvaluatedCandidate, EvaluatedPopulation, PopulationStats};
    use chrono::Local;

    fn stats_with(best_fitness: f64, generation: u64, elapsed: Duration) -> PopulationStats<u32> {
        let population =
            EvaluatedPopulation::new(vec![EvaluatedCandidate::new(1u32, best_fitness)]);
        let mut stats = PopulationStats::compute(&population, true, 0, generation, Local::now());
        stats.elapsed = elapsed;
        stats
    }

    #[test]
    fn target_fitness_under_natural_polarity() {
        let condition = TargetFitness::natural(20.);

        assert!(!condition.should_terminate(&stats_with(19.9, 0, Duration::zero())));
        assert!(condition.should_terminate(&stats_with(20., 0, Duration::zero())));
    }

    #[test]
    fn target_fitness_under_non_natural_polarity() {
        let condition = TargetFitness::non_natural(0.);

        assert!(!condition.should_terminate(&stats_with(0.5, 0, Duration::zero())));
        assert!(condition.should_terminate(&stats_with(0., 0, Duration::zero())));
    }

    #[test]
    fn generation_count_fires_after_the_configured_generations() {
        let condition = GenerationCount::new(5);

        assert!(!condition.should_terminate(&stats_with(1., 3, Duration::zero())));
        assert!(condition.should_terminate(&stats_with(1., 4, Duration::zero())));
    }

    #[test]
    fn elapsed_time_fires_once_the_duration_is_reached() {
        let condition = ElapsedTime::new(Duration::seconds(1));

        assert!(!condition.should_terminate(&stats_with(1., 0, Duration::milliseconds(100))));
        assert!(condition.should_terminate(&stats_with(1., 0, Duration::seconds(1))));
    }

    #[test]
    fn user_abort_fires_only_after_the_handle_raised_the_signal() {
        let condition = UserAbort::new();
        let handle = condition.handle();

        assert!(!TerminationCondition::<u32>::should_terminate(
            &condition,
            &stats_with(1., 0, Duration::zero())
        ));

        handle.abort();
        assert!(TerminationCondition::<u32>::should_terminate(
            &condition,
            &stats_with(1., 0, Duration::zero())
        ));

        condition.reset();
        assert!(!TerminationCondition::<u32>::should_terminate(
            &condition,
            &stats_with(1., 0, Duration::zero())
        ));
    }
}
