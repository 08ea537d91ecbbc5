//! The `evaluation` module distributes fitness evaluations across a pool of
//! worker threads and collects the scores in input order.
//!
//! Each engine owns one pool. The pool is created lazily on the first
//! parallel evaluation and is torn down when the engine is dropped. The
//! candidates of a generation are partitioned into one contiguous chunk per
//! worker; every worker writes its scores into its own slot of the result,
//! and the caller is released once all chunks are done. For a fixed number
//! of workers the partitioning depends only on the population size, which
//! keeps the engine trajectory deterministic for pure fitness functions.

use crate::{
    error::{Error, ErrorKind},
    genetic::{Candidate, FitnessEvaluator},
    population::{EvaluatedCandidate, EvaluatedPopulation},
};
use rayon::prelude::*;
use std::{
    any::Any,
    cell::OnceCell,
    fmt::{self, Debug},
    panic::{catch_unwind, AssertUnwindSafe},
    thread,
};

/// The per-engine pool of fitness evaluation workers.
pub(crate) struct FitnessPool {
    pool: OnceCell<rayon::ThreadPool>,
}

impl FitnessPool {
    pub(crate) fn new() -> Self {
        FitnessPool {
            pool: OnceCell::new(),
        }
    }

    /// Returns the thread pool, creating it on first use with one worker
    /// per available processor.
    fn get(&self) -> Result<&rayon::ThreadPool, Error> {
        if let Some(pool) = self.pool.get() {
            return Ok(pool);
        }
        let workers = thread::available_parallelism()
            .map(usize::from)
            .unwrap_or(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|error| {
                Error::new(
                    ErrorKind::EvaluatorFailure,
                    format!("can't create the fitness evaluation pool: {}", error),
                )
            })?;
        Ok(self.pool.get_or_init(|| pool))
    }
}

impl Debug for FitnessPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FitnessPool")
            .field("workers", &self.pool.get().map(rayon::ThreadPool::current_num_threads))
            .finish()
    }
}

/// Scores all candidates and pairs each one with its fitness.
///
/// The order of the returned population corresponds to the input order; the
/// polarity-aware sort is applied later by the engine. With `single_threaded`
/// set, all evaluations run inline on the caller and no pool is created.
pub(crate) fn evaluate_population<C, E>(
    candidates: Vec<C>,
    evaluator: &E,
    pool: &FitnessPool,
    single_threaded: bool,
) -> Result<EvaluatedPopulation<C>, Error>
where
    C: Candidate,
    E: FitnessEvaluator<C> + ?Sized,
{
    let fitness = if single_threaded {
        candidates
            .iter()
            .map(|candidate| evaluator.fitness(candidate, &candidates))
            .collect()
    } else {
        parallel_fitness(&candidates, evaluator, pool.get()?)?
    };

    let mut members = Vec::with_capacity(candidates.len());
    for (candidate, fitness) in candidates.into_iter().zip(fitness) {
        if !fitness.is_finite() || fitness < 0. {
            return Err(Error::new(
                ErrorKind::EvaluatorFailure,
                format!(
                    "fitness of candidate {:?} is {}; fitness scores must be finite and \
                     non-negative",
                    candidate, fitness
                ),
            ));
        }
        members.push(EvaluatedCandidate::new(candidate, fitness));
    }
    Ok(EvaluatedPopulation::new(members))
}

/// Fans the fitness calls out over the worker pool, one contiguous chunk of
/// candidates per worker, and returns the scores in input order.
fn parallel_fitness<C, E>(
    candidates: &[C],
    evaluator: &E,
    pool: &rayon::ThreadPool,
) -> Result<Vec<f64>, Error>
where
    C: Candidate,
    E: FitnessEvaluator<C> + ?Sized,
{
    let workers = pool.current_num_threads().min(candidates.len()).max(1);
    let chunk_len = (candidates.len() + workers - 1) / workers;

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        pool.install(|| {
            candidates
                .par_chunks(chunk_len)
                .map(|chunk| {
                    chunk
                        .iter()
                        .map(|candidate| evaluator.fitness(candidate, candidates))
                        .collect::<Vec<f64>>()
                })
                .collect::<Vec<_>>()
        })
    }));

    match outcome {
        Ok(chunks) => Ok(chunks.into_iter().flatten().collect()),
        Err(panic) => Err(Error::new(
            ErrorKind::EvaluatorFailure,
            format!(
                "fitness evaluation panicked in a worker: {}",
                panic_message(&panic)
            ),
        )),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetic::FitnessFn;

    fn count_true(candidate: &Vec<bool>, _: &[Vec<bool>]) -> f64 {
        candidate.iter().filter(|&&bit| bit).count() as f64
    }

    #[test]
    fn inline_evaluation_preserves_input_order() {
        let candidates = vec![
            vec![true, true, false],
            vec![false, false, false],
            vec![true, true, true],
        ];

        let evaluated = evaluate_population(
            candidates,
            &FitnessFn::natural(count_true),
            &FitnessPool::new(),
            true,
        )
        .unwrap();

        assert_eq!(evaluated.fitness_values(), vec![2., 0., 3.]);
    }

    #[test]
    fn parallel_evaluation_matches_inline_evaluation() {
        let candidates: Vec<Vec<bool>> = (0..97)
            .map(|i| (0..20).map(|bit| (i >> (bit % 8)) & 1 == 1).collect())
            .collect();
        let evaluator = FitnessFn::natural(count_true);

        let inline =
            evaluate_population(candidates.clone(), &evaluator, &FitnessPool::new(), true)
                .unwrap();
        let parallel =
            evaluate_population(candidates, &evaluator, &FitnessPool::new(), false).unwrap();

        assert_eq!(inline.fitness_values(), parallel.fitness_values());
    }

    #[test]
    fn evaluator_sees_the_whole_population() {
        let candidates = vec![1u32, 2, 3, 4];
        let evaluator = FitnessFn::natural(|candidate: &u32, population: &[u32]| {
            assert_eq!(population.len(), 4);
            *candidate as f64
        });

        let evaluated =
            evaluate_population(candidates, &evaluator, &FitnessPool::new(), false).unwrap();

        assert_eq!(evaluated.fitness_values(), vec![1., 2., 3., 4.]);
    }

    #[test]
    fn panicking_evaluator_surfaces_as_evaluator_failure() {
        let candidates = vec![0u32; 16];
        let evaluator = FitnessFn::natural(|_: &u32, _: &[u32]| -> f64 {
            panic!("deliberately broken fitness function")
        });

        let error = evaluate_population(candidates, &evaluator, &FitnessPool::new(), false)
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::EvaluatorFailure);
        assert!(error.message().contains("deliberately broken"));
    }

    #[test]
    fn negative_fitness_surfaces_as_evaluator_failure() {
        let candidates = vec![1u32];
        let evaluator = FitnessFn::natural(|_: &u32, _: &[u32]| -1.);

        let error = evaluate_population(candidates, &evaluator, &FitnessPool::new(), true)
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::EvaluatorFailure);
    }

    #[test]
    fn nan_fitness_surfaces_as_evaluator_failure() {
        let candidates = vec![1u32];
        let evaluator = FitnessFn::natural(|_: &u32, _: &[u32]| f64::NAN);

        let error = evaluate_population(candidates, &evaluator, &FitnessPool::new(), true)
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::EvaluatorFailure);
    }
}
