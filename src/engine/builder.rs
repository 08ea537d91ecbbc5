//! A staged builder for assembling an [`Engine`] from its components.

use crate::{
    engine::Engine,
    epoch::Epocher,
    genetic::{Candidate, CandidateFactory, FitnessEvaluator},
    random::Seed,
};
use std::marker::PhantomData;

/// Starts building an evolution engine for the candidates produced by the
/// given factory.
///
/// ```ignore
/// let mut engine = evolution_engine(factory)
///     .with_evaluator(evaluator)
///     .with_epocher(epocher)
///     .with_seed(seed)
///     .build();
/// ```
pub fn evolution_engine<C, F>(factory: F) -> EngineBuilderWithFactory<C, F>
where
    C: Candidate,
    F: CandidateFactory<C>,
{
    EngineBuilderWithFactory {
        _candidate: PhantomData,
        factory,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineBuilderWithFactory<C, F>
where
    C: Candidate,
    F: CandidateFactory<C>,
{
    _candidate: PhantomData<C>,
    factory: F,
}

impl<C, F> EngineBuilderWithFactory<C, F>
where
    C: Candidate,
    F: CandidateFactory<C>,
{
    pub fn with_evaluator<E>(self, evaluator: E) -> EngineBuilderWithEvaluator<C, F, E>
    where
        E: FitnessEvaluator<C>,
    {
        EngineBuilderWithEvaluator {
            _candidate: self._candidate,
            factory: self.factory,
            evaluator,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineBuilderWithEvaluator<C, F, E>
where
    C: Candidate,
    F: CandidateFactory<C>,
    E: FitnessEvaluator<C>,
{
    _candidate: PhantomData<C>,
    factory: F,
    evaluator: E,
}

impl<C, F, E> EngineBuilderWithEvaluator<C, F, E>
where
    C: Candidate,
    F: CandidateFactory<C>,
    E: FitnessEvaluator<C>,
{
    pub fn with_epocher<P>(self, epocher: P) -> EngineBuilder<C, F, E, P>
    where
        P: Epocher<C>,
    {
        EngineBuilder {
            _candidate: self._candidate,
            factory: self.factory,
            evaluator: self.evaluator,
            epocher,
            seed: None,
            single_threaded: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineBuilder<C, F, E, P>
where
    C: Candidate,
    F: CandidateFactory<C>,
    E: FitnessEvaluator<C>,
    P: Epocher<C>,
{
    _candidate: PhantomData<C>,
    factory: F,
    evaluator: E,
    epocher: P,
    seed: Option<Seed>,
    single_threaded: bool,
}

impl<C, F, E, P> EngineBuilder<C, F, E, P>
where
    C: Candidate,
    F: CandidateFactory<C>,
    E: FitnessEvaluator<C>,
    P: Epocher<C>,
{
    /// Seeds the RNG stream of the engine. Without a seed the engine is
    /// seeded from entropy.
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Makes the engine evaluate fitness inline on the calling thread.
    pub fn single_threaded(mut self, single_threaded: bool) -> Self {
        self.single_threaded = single_threaded;
        self
    }

    pub fn build(self) -> Engine<C, F, E, P> {
        let mut engine = Engine::new(self.factory, self.evaluator, self.epocher);
        if let Some(seed) = self.seed {
            engine.reseed(seed);
        }
        engine.set_single_threaded(self.single_threaded);
        engine
    }
}
