//! The `epoch` module defines the `Epocher`, the component that advances the
//! population by one generation, and the two provided implementations:
//! [`Generational`] and [`SteadyState`].

use crate::{
    error::{Error, ErrorKind},
    evaluation::{evaluate_population, FitnessPool},
    genetic::{Candidate, FitnessEvaluator},
    operator::{EvolutionaryOperator, Pipeline},
    population::EvaluatedPopulation,
    random::Prng,
    selection::SelectionStrategy,
};
use std::fmt::Debug;

/// The context an [`Epocher`] runs in. It gives access to the RNG owned by
/// the engine, the fitness polarity and the engine's fitness evaluation
/// facility.
pub struct EpochContext<'a, C>
where
    C: Candidate,
{
    pub(crate) rng: &'a mut Prng,
    pub(crate) natural: bool,
    pub(crate) evaluator: &'a dyn FitnessEvaluator<C>,
    pub(crate) pool: &'a FitnessPool,
    pub(crate) single_threaded: bool,
}

impl<C> Debug for EpochContext<'_, C>
where
    C: Candidate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpochContext")
            .field("natural", &self.natural)
            .field("single_threaded", &self.single_threaded)
            .finish()
    }
}

impl<'a, C> EpochContext<'a, C>
where
    C: Candidate,
{
    /// The random number generator of the engine.
    pub fn rng(&mut self) -> &mut Prng {
        &mut *self.rng
    }

    /// Whether the fitness scores of the driving evaluator are natural.
    pub fn natural(&self) -> bool {
        self.natural
    }

    /// Scores the given candidates with the engine's evaluator, using the
    /// engine's worker pool unless the engine runs single-threaded. The
    /// returned population is unsorted; the engine sorts it afterwards.
    pub fn evaluate(&self, candidates: Vec<C>) -> Result<EvaluatedPopulation<C>, Error> {
        evaluate_population(candidates, self.evaluator, self.pool, self.single_threaded)
    }
}

/// An `Epocher` performs a single step of the evolutionary process: it
/// derives the candidates of the next generation from the current evaluated
/// population and evaluates them.
///
/// The population passed in is sorted best first. The returned population
/// need not be sorted - the engine applies the polarity-aware sort before
/// statistics are computed.
pub trait Epocher<C>
where
    C: Candidate,
{
    /// Advances the population by one step, preserving `elite_count` of the
    /// fittest candidates unchanged.
    fn epoch(
        &self,
        current: &EvaluatedPopulation<C>,
        elite_count: usize,
        ctx: &mut EpochContext<'_, C>,
    ) -> Result<EvaluatedPopulation<C>, Error>;
}

/// The `Generational` epocher replaces the whole population each step.
///
/// One step selects `population size - elite count` parents, pushes them
/// through the operator pipeline and combines the offspring with the elites
/// copied unchanged from the top of the current generation. The elites
/// re-enter evaluation so that population-dependent evaluators see them in
/// the context of the new generation; they remain eligible for selection
/// like any other candidate.
#[derive(Debug)]
pub struct Generational<C>
where
    C: Candidate,
{
    selection: Box<dyn SelectionStrategy<C>>,
    pipeline: Pipeline<C>,
}

impl<C> Generational<C>
where
    C: Candidate,
{
    pub fn new(selection: impl SelectionStrategy<C> + 'static, pipeline: Pipeline<C>) -> Self {
        Generational {
            selection: Box::new(selection),
            pipeline,
        }
    }
}

impl<C> Epocher<C> for Generational<C>
where
    C: Candidate,
{
    fn epoch(
        &self,
        current: &EvaluatedPopulation<C>,
        elite_count: usize,
        ctx: &mut EpochContext<'_, C>,
    ) -> Result<EvaluatedPopulation<C>, Error> {
        let population_size = current.len();
        if elite_count > population_size {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!(
                    "elite count {} exceeds the population size {}",
                    elite_count, population_size
                ),
            ));
        }
        let breed_count = population_size - elite_count;

        let mut next_candidates: Vec<C> = current
            .members()
            .iter()
            .take(elite_count)
            .map(|member| member.candidate().clone())
            .collect();

        let parents = self
            .selection
            .select(current, ctx.natural(), breed_count, ctx.rng());
        let offspring = self.pipeline.apply(parents, ctx.rng());
        if offspring.len() != breed_count {
            return Err(Error::new(
                ErrorKind::OperatorMisuse,
                format!(
                    "operator pipeline returned {} offspring for {} selected parents",
                    offspring.len(),
                    breed_count
                ),
            ));
        }

        next_candidates.extend(offspring);
        ctx.evaluate(next_candidates)
    }
}

/// The `SteadyState` epocher replaces only one or two individuals per step.
///
/// One step selects as many parents as individuals are to be replaced,
/// pushes them through the operator pipeline and replaces the worst ranked
/// individuals of the current generation with the offspring. The whole
/// population re-enters evaluation, so population-dependent evaluators stay
/// consistent.
#[derive(Debug)]
pub struct SteadyState<C>
where
    C: Candidate,
{
    selection: Box<dyn SelectionStrategy<C>>,
    pipeline: Pipeline<C>,
    replace_count: usize,
}

impl<C> SteadyState<C>
where
    C: Candidate,
{
    /// Creates a steady-state epocher replacing `replace_count` individuals
    /// per step.
    ///
    /// Fails with [`ErrorKind::InvalidArgument`] unless `replace_count` is
    /// 1 or 2.
    pub fn new(
        selection: impl SelectionStrategy<C> + 'static,
        pipeline: Pipeline<C>,
        replace_count: usize,
    ) -> Result<Self, Error> {
        if !(1..=2).contains(&replace_count) {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!(
                    "steady-state replacement count must be 1 or 2, got {}",
                    replace_count
                ),
            ));
        }
        Ok(SteadyState {
            selection: Box::new(selection),
            pipeline,
            replace_count,
        })
    }
}

impl<C> Epocher<C> for SteadyState<C>
where
    C: Candidate,
{
    fn epoch(
        &self,
        current: &EvaluatedPopulation<C>,
        elite_count: usize,
        ctx: &mut EpochContext<'_, C>,
    ) -> Result<EvaluatedPopulation<C>, Error> {
        let population_size = current.len();
        let replace_count = self
            .replace_count
            .min(population_size.saturating_sub(elite_count));

        let parents = self
            .selection
            .select(current, ctx.natural(), replace_count, ctx.rng());
        let mut offspring = self.pipeline.apply(parents, ctx.rng());
        if offspring.len() != replace_count {
            return Err(Error::new(
                ErrorKind::OperatorMisuse,
                format!(
                    "operator pipeline returned {} offspring for {} selected parents",
                    offspring.len(),
                    replace_count
                ),
            ));
        }

        let mut next_candidates: Vec<C> = current
            .members()
            .iter()
            .take(population_size - replace_count)
            .map(|member| member.candidate().clone())
            .collect();
        next_candidates.append(&mut offspring);
        ctx.evaluate(next_candidates)
    }
}

/// Builds an evaluated population from scored candidates, for tests.
#[cfg(test)]
pub(crate) fn evaluated_from_scores<C: Candidate>(
    candidates: Vec<(C, f64)>,
) -> EvaluatedPopulation<C> {
    use crate::population::EvaluatedCandidate;
    EvaluatedPopulation::new(
        candidates
            .into_iter()
            .map(|(candidate, fitness)| EvaluatedCandidate::new(candidate, fitness))
            .collect(),
    )
}
