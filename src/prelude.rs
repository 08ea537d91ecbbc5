//! The `prelude` re-exports the types needed to assemble and run an
//! evolution engine.

//
// Genetic
//
pub use crate::genetic::{Candidate, CandidateFactory, FitnessEvaluator, FitnessFn};

//
// Engine
//
pub use crate::engine::{evolution_engine, Conditions, Engine};
pub use crate::epoch::{EpochContext, Epocher, Generational, SteadyState};
pub use crate::random::{get_rng, random_seed, Prng, Rng, Seed};

//
// Population
//
pub use crate::population::{EvaluatedCandidate, EvaluatedPopulation, PopulationStats};

//
// Selection
//
pub use crate::selection::{
    RankSelector, RouletteWheelSelector, SelectionStrategy, TournamentSelector,
    UniversalSamplingSelector,
};

//
// Operators
//
pub use crate::generator::{
    ConstantInt, ConstantProbability, IntGenerator, PoissonInt, ProbabilityGenerator,
    UniformInt, UniformProbability,
};
pub use crate::operator::{
    BitFlipMutation, BitStringMater, Crossover, EvolutionaryOperator, ListMater,
    ListOrderMutation, Mater, Pipeline, StringMater, StringMutation,
};

//
// Factories
//
pub use crate::factory::{AsciiStringFactory, BitStringFactory, PermutationFactory};

//
// Observation and termination
//
pub use crate::error::{Error, ErrorKind};
pub use crate::observer::Observer;
pub use crate::termination::{
    AbortHandle, ElapsedTime, GenerationCount, TargetFitness, TerminationCondition, UserAbort,
};
