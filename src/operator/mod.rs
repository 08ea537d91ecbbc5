//! The `operator` module defines the evolutionary operators that transform
//! the selected parents into the offspring of the next generation, and the
//! pipeline that composes them.
//!
//! An operator must not modify the candidates it receives; it consumes the
//! selection and returns a new list of the same length. Candidates that an
//! operator leaves untouched are passed through as they are.

pub mod crossover;
pub mod mutation;

pub use self::{
    crossover::{BitStringMater, Crossover, ListMater, Mater, StringMater},
    mutation::{BitFlipMutation, ListOrderMutation, StringMutation},
};

use crate::{genetic::Candidate, random::Prng};
use std::fmt::Debug;

/// An `EvolutionaryOperator` transforms the list of selected candidates
/// into a new list of the same length.
///
/// The operator works on the list returned by the selection strategy, not on
/// the population itself. Each entry of the list must be operated on exactly
/// once; the list may contain the same candidate more than once. Operators
/// must not assume any particular ordering of the selection - if an
/// operator needs ordering or shuffling, it has to establish it itself.
pub trait EvolutionaryOperator<C>: Debug
where
    C: Candidate,
{
    /// Applies the operation to each entry of the selection.
    fn apply(&self, selection: Vec<C>, rng: &mut Prng) -> Vec<C>;
}

/// A `Pipeline` is a compound operator that applies its operators in
/// sequence to the selection.
#[derive(Debug)]
pub struct Pipeline<C>
where
    C: Candidate,
{
    operators: Vec<Box<dyn EvolutionaryOperator<C>>>,
}

impl<C> Pipeline<C>
where
    C: Candidate,
{
    /// Creates an empty pipeline. An empty pipeline passes the selection
    /// through unchanged.
    pub fn new() -> Self {
        Pipeline {
            operators: Vec::new(),
        }
    }

    /// Appends an operator to the end of this pipeline.
    pub fn with(mut self, operator: impl EvolutionaryOperator<C> + 'static) -> Self {
        self.operators.push(Box::new(operator));
        self
    }

    /// Returns the number of operators in this pipeline.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Returns `true` if this pipeline contains no operators.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl<C> Default for Pipeline<C>
where
    C: Candidate,
{
    fn default() -> Self {
        Pipeline::new()
    }
}

impl<C> EvolutionaryOperator<C> for Pipeline<C>
where
    C: Candidate,
{
    fn apply(&self, selection: Vec<C>, rng: &mut Prng) -> Vec<C> {
        self.operators
            .iter()
            .fold(selection, |selection, operator| {
                operator.apply(selection, rng)
            })
    }
}
