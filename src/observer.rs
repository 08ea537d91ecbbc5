//! The `observer` module defines the callback interface for receiving
//! per-generation statistics.

use crate::{genetic::Candidate, population::PopulationStats};

/// An `Observer` receives the statistics of every generation while the
/// engine is evolving.
///
/// Updates are dispatched synchronously on the thread that called `evolve*`,
/// strictly in generation order starting at generation 0. Observers should
/// complete their processing and return in a timely manner to avoid holding
/// up the evolution. The statistics are borrowed for the duration of the
/// callback and must not be retained beyond it.
pub trait Observer<C>
where
    C: Candidate,
{
    /// Called once per generation after the population has been evaluated,
    /// sorted and measured.
    fn population_update(&self, stats: &PopulationStats<C>);
}
