//! # evogen
//!
//! `evogen` is a library for running evolutionary algorithms over arbitrary
//! candidate types.
//!
//! The library supplies the generational loop, a parallel fitness evaluator,
//! built-in selection strategies, a pipeline of variation operators, elitism,
//! observer dispatch and termination arbitration. Clients supply the domain
//! specific pieces: how to create a random candidate, how to score one and
//! how to recombine and mutate candidates.
//!
//! ## Overview
//!
//! An [`engine::Engine`] is assembled from a [`genetic::CandidateFactory`],
//! a [`genetic::FitnessEvaluator`] and an [`epoch::Epocher`] such as
//! [`epoch::Generational`]. The epocher in turn is built from one of the
//! [`selection`] strategies and an [`operator::Pipeline`] of variation
//! operators. Calling one of the `evolve*` methods runs the algorithm until
//! one of the given [`termination::TerminationCondition`]s is satisfied.
//!
//! ```ignore
//! use evogen::prelude::*;
//!
//! let mut engine = evolution_engine(BitStringFactory::new(20))
//!     .with_evaluator(FitnessFn::natural(|bits: &FixedBitSet, _: &[FixedBitSet]| {
//!         bits.count_ones(..) as f64
//!     }))
//!     .with_epocher(Generational::new(
//!         RouletteWheelSelector::new(),
//!         Pipeline::new().with(BitFlipMutation::new(ConstantProbability::new(0.01)?)),
//!     ))
//!     .build();
//!
//! let best = engine.evolve(100, 5, vec![Box::new(TargetFitness::natural(20.0))])?;
//! ```

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

pub mod prelude;

pub mod genetic;

pub mod error;

pub mod random;

pub mod generator;

pub mod population;

mod evaluation;

pub mod selection;

pub mod operator;

pub mod factory;

pub mod epoch;

pub mod engine;

pub mod observer;

pub mod termination;
