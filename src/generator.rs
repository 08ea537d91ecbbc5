//! The `generator` module defines small generators for the numeric
//! parameters of variation operators: how many crossover points to use, with
//! which probability to cross over, how many mutations to apply and how far
//! a mutation reaches.
//!
//! Each generator draws from the random number generator passed in by the
//! caller, so all variation remains tied to the single RNG stream owned by
//! the engine.

use crate::{
    error::{Error, ErrorKind},
    random::Prng,
};
use rand::Rng;
use rand_distr::{Distribution, Poisson};
use std::fmt::Debug;

/// A generator of non-negative integer values.
pub trait IntGenerator: Debug {
    /// Produces the next value of this generator.
    fn next_value(&self, rng: &mut Prng) -> u64;
}

/// A generator of probability values in the range `[0, 1]`.
pub trait ProbabilityGenerator: Debug {
    /// Produces the next probability of this generator.
    fn next_probability(&self, rng: &mut Prng) -> f64;
}

/// An `IntGenerator` that always produces the same value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConstantInt {
    value: u64,
}

impl ConstantInt {
    pub fn new(value: u64) -> Self {
        ConstantInt { value }
    }
}

impl IntGenerator for ConstantInt {
    fn next_value(&self, _: &mut Prng) -> u64 {
        self.value
    }
}

/// An `IntGenerator` that produces values uniformly distributed in the half
/// open range `[low, high)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UniformInt {
    low: u64,
    high: u64,
}

impl UniformInt {
    pub fn new(low: u64, high: u64) -> Result<Self, Error> {
        if low >= high {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("uniform range is empty: low {} must be smaller than high {}", low, high),
            ));
        }
        Ok(UniformInt { low, high })
    }
}

impl IntGenerator for UniformInt {
    fn next_value(&self, rng: &mut Prng) -> u64 {
        rng.gen_range(self.low..self.high)
    }
}

/// An `IntGenerator` that produces Poisson distributed values with the given
/// mean.
#[derive(Clone, Copy, Debug)]
pub struct PoissonInt {
    distribution: Poisson<f64>,
    mean: f64,
}

impl PoissonInt {
    pub fn new(mean: f64) -> Result<Self, Error> {
        if !mean.is_finite() || mean <= 0. {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("mean of a Poisson distribution must be positive and finite, got {}", mean),
            ));
        }
        let distribution = Poisson::new(mean).map_err(|error| {
            Error::new(
                ErrorKind::InvalidArgument,
                format!("invalid mean {} for a Poisson distribution: {}", mean, error),
            )
        })?;
        Ok(PoissonInt { distribution, mean })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }
}

impl IntGenerator for PoissonInt {
    fn next_value(&self, rng: &mut Prng) -> u64 {
        self.distribution.sample(rng) as u64
    }
}

/// A `ProbabilityGenerator` that always produces the same probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantProbability {
    value: f64,
}

impl ConstantProbability {
    pub fn new(value: f64) -> Result<Self, Error> {
        if !(0. ..=1.).contains(&value) {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("probability must be in the range [0, 1], got {}", value),
            ));
        }
        Ok(ConstantProbability { value })
    }

    /// The probability of the certain event.
    pub fn one() -> Self {
        ConstantProbability { value: 1. }
    }
}

impl ProbabilityGenerator for ConstantProbability {
    fn next_probability(&self, _: &mut Prng) -> f64 {
        self.value
    }
}

/// A `ProbabilityGenerator` that produces probabilities uniformly
/// distributed in the range `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformProbability {
    min: f64,
    max: f64,
}

impl UniformProbability {
    pub fn new(min: f64, max: f64) -> Result<Self, Error> {
        if !(0. ..=1.).contains(&min) || !(0. ..=1.).contains(&max) || min > max {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("probability range [{}, {}) must be within [0, 1]", min, max),
            ));
        }
        Ok(UniformProbability { min, max })
    }
}

impl ProbabilityGenerator for UniformProbability {
    fn next_probability(&self, rng: &mut Prng) -> f64 {
        self.min + (self.max - self.min) * rng.gen::<f64>()
    }
}
