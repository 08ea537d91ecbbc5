//! The `engine` module provides the evolution engine that drives a
//! population of candidate solutions through successive generations until
//! one of the given termination conditions is satisfied.
//!
//! One pass of the engine loop performs the stages:
//!
//! 1. **Select**: pick the parents of the next generation according to the
//!    selection strategy of the configured epocher.
//! 2. **Vary**: push the parents through the pipeline of crossover and
//!    mutation operators to breed the offspring.
//! 3. **Evaluate**: score the offspring together with the preserved elites,
//!    in parallel across the engine's worker pool.
//! 4. **Rank**: sort the new generation best first under the fitness
//!    polarity of the evaluator.
//! 5. **Observe**: compute the population statistics and dispatch them to
//!    all registered observers.
//! 6. **Terminate**: evaluate all termination conditions and stop once at
//!    least one of them is satisfied.

mod builder;

pub use self::builder::{
    evolution_engine, EngineBuilder, EngineBuilderWithEvaluator, EngineBuilderWithFactory,
};


use crate::{
    epoch::{EpochContext, Epocher},
    error::{Error, ErrorKind},
    evaluation::{evaluate_population, FitnessPool},
    genetic::{Candidate, CandidateFactory, FitnessEvaluator},
    observer::Observer,
    population::{EvaluatedCandidate, EvaluatedPopulation, PopulationStats},
    random::{get_rng, random_seed, Prng, Seed},
    termination::TerminationCondition,
};
use chrono::Local;
use std::{
    fmt::{self, Debug},
    rc::Rc,
};

/// The boxed form termination conditions are passed to the `evolve*`
/// methods in.
pub type Conditions<C> = Vec<Box<dyn TerminationCondition<C>>>;

/// An `Engine` evolves a population of candidates, built from a candidate
/// factory, a fitness evaluator and an epocher.
///
/// The engine owns the single RNG stream all stochastic decisions of a run
/// draw from, the set of observers and a lazily created pool of fitness
/// evaluation workers that lives until the engine is dropped. An engine is
/// driven by calling one of the four `evolve*` methods; it can be reused
/// for further runs after a run has finished.
pub struct Engine<C, F, E, P>
where
    C: Candidate,
    F: CandidateFactory<C>,
    E: FitnessEvaluator<C>,
    P: Epocher<C>,
{
    factory: F,
    evaluator: E,
    epocher: P,
    observers: Vec<Rc<dyn Observer<C>>>,
    rng: Prng,
    single_threaded: bool,
    pool: FitnessPool,
    conditions: Conditions<C>,
    satisfied: Option<Vec<usize>>,
}

impl<C, F, E, P> Engine<C, F, E, P>
where
    C: Candidate,
    F: CandidateFactory<C>,
    E: FitnessEvaluator<C>,
    P: Epocher<C>,
{
    /// Creates a new engine from its components, seeded from entropy. Use
    /// [`evolution_engine`] for a fluent way of assembling an engine, or
    /// [`reseed`](Engine::reseed) for a reproducible RNG stream.
    pub fn new(factory: F, evaluator: E, epocher: P) -> Self {
        Engine {
            factory,
            evaluator,
            epocher,
            observers: Vec::new(),
            rng: get_rng(random_seed()),
            single_threaded: false,
            pool: FitnessPool::new(),
            conditions: Vec::new(),
            satisfied: None,
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn epocher(&self) -> &P {
        &self.epocher
    }

    /// Restarts the engine's RNG stream from the given seed. For a fixed
    /// seed and single-threaded evaluation, runs are reproducible.
    pub fn reseed(&mut self, seed: Seed) {
        self.rng = get_rng(seed);
    }

    /// Forces fitness evaluation to run inline on the calling thread
    /// instead of on the worker pool.
    ///
    /// This is the mode that yields bit-exact reproducible runs. It can
    /// also be faster for trivial fitness functions.
    pub fn set_single_threaded(&mut self, single_threaded: bool) {
        self.single_threaded = single_threaded;
    }

    /// Registers an observer to receive statistics of every generation.
    /// Each observer receives each update exactly once, no matter how often
    /// it is added.
    pub fn add_observer(&mut self, observer: Rc<dyn Observer<C>>) {
        if !self
            .observers
            .iter()
            .any(|existing| Rc::ptr_eq(existing, &observer))
        {
            self.observers.push(observer);
        }
    }

    /// Removes a previously registered observer.
    pub fn remove_observer(&mut self, observer: &Rc<dyn Observer<C>>) {
        self.observers
            .retain(|existing| !Rc::ptr_eq(existing, observer));
    }

    /// Returns the termination conditions that were satisfied when the last
    /// run stopped, in the order they were passed to the `evolve*` call.
    ///
    /// Usually this list contains one condition, but several conditions can
    /// become satisfied in the same generation.
    ///
    /// Fails with [`ErrorKind::InvalidState`] if no run has terminated yet.
    pub fn satisfied_termination_conditions(
        &self,
    ) -> Result<Vec<&dyn TerminationCondition<C>>, Error> {
        match &self.satisfied {
            Some(indices) => Ok(indices
                .iter()
                .map(|&index| self.conditions[index].as_ref())
                .collect()),
            None => Err(Error::new(
                ErrorKind::InvalidState,
                "the evolution engine has not terminated",
            )),
        }
    }

    /// Executes the evolutionary algorithm until one of the termination
    /// conditions is satisfied, then returns the fittest candidate of the
    /// final generation.
    ///
    /// `population_size` is the number of candidates present in the
    /// population at any point in time. `elite_count` is the number of
    /// candidates preserved via elitism: the best scoring candidates are
    /// carried unchanged into the subsequent generation while remaining
    /// eligible for selection. It must be smaller than the population size;
    /// zero disables elitism.
    pub fn evolve(
        &mut self,
        population_size: usize,
        elite_count: usize,
        conditions: Conditions<C>,
    ) -> Result<EvaluatedCandidate<C>, Error> {
        self.evolve_with_seeds(population_size, elite_count, Vec::new(), conditions)
    }

    /// Like [`evolve`](Engine::evolve), but seeds the starting population
    /// with the given candidates. At most `population_size` seeds may be
    /// given; the remaining slots are filled by the factory.
    pub fn evolve_with_seeds(
        &mut self,
        population_size: usize,
        elite_count: usize,
        seeds: Vec<C>,
        conditions: Conditions<C>,
    ) -> Result<EvaluatedCandidate<C>, Error> {
        let population =
            self.evolve_population_with_seeds(population_size, elite_count, seeds, conditions)?;
        Ok(population.best().clone())
    }

    /// Executes the evolutionary algorithm until one of the termination
    /// conditions is satisfied, then returns the entire final generation,
    /// sorted best first.
    pub fn evolve_population(
        &mut self,
        population_size: usize,
        elite_count: usize,
        conditions: Conditions<C>,
    ) -> Result<EvaluatedPopulation<C>, Error> {
        self.evolve_population_with_seeds(population_size, elite_count, Vec::new(), conditions)
    }

    /// Like [`evolve_population`](Engine::evolve_population), but seeds the
    /// starting population with the given candidates.
    pub fn evolve_population_with_seeds(
        &mut self,
        population_size: usize,
        elite_count: usize,
        seeds: Vec<C>,
        conditions: Conditions<C>,
    ) -> Result<EvaluatedPopulation<C>, Error> {
        if population_size < 1 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "population size must be at least 1",
            ));
        }
        if elite_count >= population_size {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!(
                    "elite count must be less than the population size, got {} of {}",
                    elite_count, population_size
                ),
            ));
        }
        if conditions.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "at least one termination condition must be specified",
            ));
        }
        if seeds.len() > population_size {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!(
                    "too many seed candidates: got {} seeds for a population of size {}",
                    seeds.len(),
                    population_size
                ),
            ));
        }

        self.satisfied = None;
        self.conditions = conditions;
        let started_at = Local::now();
        let natural = self.evaluator.is_natural();
        let mut generation: u64 = 0;

        let candidates = self
            .factory
            .seed_population(population_size, seeds, &mut self.rng)?;
        let mut evaluated = evaluate_population(
            candidates,
            &self.evaluator,
            &self.pool,
            self.single_threaded,
        )?;
        evaluated.sort_by_polarity(natural);
        let mut stats =
            PopulationStats::compute(&evaluated, natural, elite_count, generation, started_at);
        self.notify_population_update(&stats);

        let mut satisfied = self.satisfied_indices(&stats);
        while satisfied.is_empty() {
            generation += 1;
            let mut ctx = EpochContext {
                rng: &mut self.rng,
                natural,
                evaluator: &self.evaluator,
                pool: &self.pool,
                single_threaded: self.single_threaded,
            };
            evaluated = self.epocher.epoch(&evaluated, elite_count, &mut ctx)?;
            evaluated.sort_by_polarity(natural);
            stats =
                PopulationStats::compute(&evaluated, natural, elite_count, generation, started_at);
            self.notify_population_update(&stats);
            satisfied = self.satisfied_indices(&stats);
        }

        self.satisfied = Some(satisfied);
        Ok(evaluated)
    }

    /// Evaluates all termination conditions against the given statistics
    /// and returns the indices of those that are satisfied, in the order
    /// the conditions were passed.
    fn satisfied_indices(&self, stats: &PopulationStats<C>) -> Vec<usize> {
        self.conditions
            .iter()
            .enumerate()
            .filter(|(_, condition)| condition.should_terminate(stats))
            .map(|(index, _)| index)
            .collect()
    }

    /// Sends the statistics of the current generation to all registered
    /// observers, synchronously on the calling thread.
    fn notify_population_update(&self, stats: &PopulationStats<C>) {
        for observer in &self.observers {
            observer.population_update(stats);
        }
    }
}

impl<C, F, E, P> Debug for Engine<C, F, E, P>
where
    C: Candidate,
    F: CandidateFactory<C> + Debug,
    E: FitnessEvaluator<C> + Debug,
    P: Epocher<C> + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("factory", &self.factory)
            .field("evaluator", &self.evaluator)
            .field("epocher", &self.epocher)
            .field("observers", &self.observers.len())
            .field("single_threaded", &self.single_threaded)
            .finish()
    }
}
