//! The `crossover` module provides the crossover operator and the maters
//! that recombine a pair of parents of a specific candidate representation.

use crate::{
    generator::{ConstantInt, ConstantProbability, IntGenerator, ProbabilityGenerator},
    genetic::Candidate,
    operator::EvolutionaryOperator,
    random::{random_n_cut_points, random_probability, Prng},
};
use fixedbitset::FixedBitSet;
use rand::seq::SliceRandom;
use std::{fmt::Debug, marker::PhantomData};

/// A `Mater` recombines a pair of parents into a pair of offspring by
/// k-point crossover. The parents are left untouched.
pub trait Mater<C>: Debug
where
    C: Candidate,
{
    /// Performs crossover with the given number of crossover points on the
    /// two parents and returns the two children.
    fn mate(&self, parent1: &C, parent2: &C, points: usize, rng: &mut Prng) -> (C, C);
}

/// The `Crossover` operator applies a [`Mater`] to randomly formed pairs of
/// the selected candidates.
///
/// The selection is shuffled before pairing so that ordering artifacts from
/// the selection strategy do not influence which candidates breed with each
/// other. For each pair, crossover is performed with the probability drawn
/// from the probability generator and the number of crossover points drawn
/// from the points generator; pairs that are not crossed over are copied
/// unchanged into the output. If the selection has an odd length the final
/// candidate passes through unchanged. A point count of zero means no
/// crossover.
#[derive(Debug)]
pub struct Crossover<C, M>
where
    C: Candidate,
    M: Mater<C>,
{
    mater: M,
    points: Box<dyn IntGenerator>,
    probability: Box<dyn ProbabilityGenerator>,
    _candidate: PhantomData<C>,
}

impl<C, M> Crossover<C, M>
where
    C: Candidate,
    M: Mater<C>,
{
    /// Creates a new `Crossover` operator with the given mater, one
    /// crossover point and a crossover probability of 1.
    pub fn new(mater: M) -> Self {
        Crossover {
            mater,
            points: Box::new(ConstantInt::new(1)),
            probability: Box::new(ConstantProbability::one()),
            _candidate: PhantomData,
        }
    }

    /// Replaces the generator for the number of crossover points.
    pub fn with_points(mut self, points: impl IntGenerator + 'static) -> Self {
        self.points = Box::new(points);
        self
    }

    /// Replaces the generator for the crossover probability.
    pub fn with_probability(mut self, probability: impl ProbabilityGenerator + 'static) -> Self {
        self.probability = Box::new(probability);
        self
    }
}

impl<C, M> EvolutionaryOperator<C> for Crossover<C, M>
where
    C: Candidate,
    M: Mater<C>,
{
    fn apply(&self, selection: Vec<C>, rng: &mut Prng) -> Vec<C> {
        let mut shuffled = selection;
        shuffled.shuffle(rng);

        let mut offspring = Vec::with_capacity(shuffled.len());
        let mut parents = shuffled.into_iter();
        while let Some(parent1) = parents.next() {
            let parent2 = match parents.next() {
                Some(parent2) => parent2,
                None => {
                    // odd number of selected candidates: the last one can't
                    // be paired up and passes through unmodified
                    offspring.push(parent1);
                    break;
                }
            };
            let points = if random_probability(rng) < self.probability.next_probability(rng) {
                self.points.next_value(rng) as usize
            } else {
                0
            };
            if points > 0 {
                let (child1, child2) = self.mater.mate(&parent1, &parent2, points, rng);
                offspring.push(child1);
                offspring.push(child2);
            } else {
                offspring.push(parent1);
                offspring.push(parent2);
            }
        }
        offspring
    }
}

/// Bounds the number of crossover points to what a genome of the given
/// length can accommodate.
fn feasible_points(points: usize, length: usize) -> usize {
    points.min(length / 2).max(1)
}

/// A `Mater` for bit string candidates.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BitStringMater;

impl BitStringMater {
    pub fn new() -> Self {
        BitStringMater
    }
}

impl Mater<FixedBitSet> for BitStringMater {
    fn mate(
        &self,
        parent1: &FixedBitSet,
        parent2: &FixedBitSet,
        points: usize,
        rng: &mut Prng,
    ) -> (FixedBitSet, FixedBitSet) {
        let length = parent1.len();
        if length < 2 {
            return (parent1.clone(), parent2.clone());
        }
        let cut_points = random_n_cut_points(rng, feasible_points(points, length), length);

        let mut child1 = parent1.clone();
        let mut child2 = parent2.clone();
        let mut cut_points = cut_points.into_iter().peekable();
        let mut swap = false;
        for locus in 0..length {
            if cut_points.next_if_eq(&locus).is_some() {
                swap = !swap;
            }
            if swap {
                child1.set(locus, parent2.contains(locus));
                child2.set(locus, parent1.contains(locus));
            }
        }
        (child1, child2)
    }
}

/// A `Mater` for string candidates. Crossover points fall on `char`
/// boundaries, so any UTF-8 string stays valid.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StringMater;

impl StringMater {
    pub fn new() -> Self {
        StringMater
    }
}

impl Mater<String> for StringMater {
    fn mate(
        &self,
        parent1: &String,
        parent2: &String,
        points: usize,
        rng: &mut Prng,
    ) -> (String, String) {
        let genome1: Vec<char> = parent1.chars().collect();
        let genome2: Vec<char> = parent2.chars().collect();
        let length = genome1.len();
        if length < 2 {
            return (parent1.clone(), parent2.clone());
        }
        let cut_points = random_n_cut_points(rng, feasible_points(points, length), length);

        let mut child1 = String::with_capacity(parent1.len());
        let mut child2 = String::with_capacity(parent2.len());
        let mut cut_points = cut_points.into_iter().peekable();
        let mut swap = false;
        for locus in 0..length {
            if cut_points.next_if_eq(&locus).is_some() {
                swap = !swap;
            }
            if swap {
                child1.push(genome2[locus]);
                child2.push(genome1[locus]);
            } else {
                child1.push(genome1[locus]);
                child2.push(genome2[locus]);
            }
        }
        (child1, child2)
    }
}

/// A `Mater` for value list candidates of any element type.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ListMater;

impl ListMater {
    pub fn new() -> Self {
        ListMater
    }
}

impl<V> Mater<Vec<V>> for ListMater
where
    V: Clone + Debug + PartialEq + Send + Sync + 'static,
{
    fn mate(
        &self,
        parent1: &Vec<V>,
        parent2: &Vec<V>,
        points: usize,
        rng: &mut Prng,
    ) -> (Vec<V>, Vec<V>) {
        let length = parent1.len();
        if length < 2 {
            return (parent1.clone(), parent2.clone());
        }
        let cut_points = random_n_cut_points(rng, feasible_points(points, length), length);

        let mut child1 = Vec::with_capacity(length);
        let mut child2 = Vec::with_capacity(length);
        let mut cut_points = cut_points.into_iter().peekable();
        let mut swap = false;
        for locus in 0..length {
            if cut_points.next_if_eq(&locus).is_some() {
                swap = !swap;
            }
            if swap {
                child1.push(parent2[locus].clone());
                child2.push(parent1[locus].clone());
            } else {
                child1.push(parent1[locus].clone());
                child2.push(parent2[locus].clone());
            }
        }
        (child1, child2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{get_rng, random_seed};

    #[test]
    fn single_point_string_crossover_swaps_a_suffix() {
        let mut rng = get_rng(random_seed());
        let parent1 = "AAAAAAAA".to_string();
        let parent2 = "BBBBBBBB".to_string();

        let (child1, child2) = StringMater::new().mate(&parent1, &parent2, 1, &mut rng);

        assert_eq!(child1.len(), 8);
        assert_eq!(child2.len(), 8);
        // both children flip their source parent exactly once
        assert!(child1.starts_with('A') && child1.ends_with('B'));
        assert!(child2.starts_with('B') && child2.ends_with('A'));
    }

    #[test]
    fn bit_string_crossover_keeps_the_genome_length() {
        let mut rng = get_rng(random_seed());
        let mut parent1 = FixedBitSet::with_capacity(20);
        parent1.insert_range(..);
        let parent2 = FixedBitSet::with_capacity(20);

        for points in 1..=4 {
            let (child1, child2) =
                BitStringMater::new().mate(&parent1, &parent2, points, &mut rng);
            assert_eq!(child1.len(), 20);
            assert_eq!(child2.len(), 20);
            // the material of both parents is conserved
            assert_eq!(child1.count_ones(..) + child2.count_ones(..), 20);
        }
    }

    #[test]
    fn mating_preserves_the_gene_pool_of_both_parents() {
        let mut rng = get_rng(random_seed());
        let parent1 = vec![1, 2, 3, 4, 5, 6];
        let parent2 = vec![10, 20, 30, 40, 50, 60];

        let (child1, child2) = ListMater::new().mate(&parent1, &parent2, 2, &mut rng);

        for locus in 0..6 {
            let values = [child1[locus], child2[locus]];
            assert!(
                values.contains(&parent1[locus]) && values.contains(&parent2[locus]),
                "locus {} lost its genes: {:?}",
                locus,
                values
            );
        }
    }

    #[test]
    fn crossover_probability_zero_passes_parents_through() {
        let mut rng = get_rng(random_seed());
        let operator = Crossover::new(ListMater::new())
            .with_probability(ConstantProbability::new(0.).unwrap());
        let selection = vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8], vec![9, 10, 11, 12]];

        let mut offspring = operator.apply(selection.clone(), &mut rng);

        assert_eq!(offspring.len(), 3);
        offspring.sort();
        let mut expected = selection;
        expected.sort();
        assert_eq!(offspring, expected);
    }

    #[test]
    fn zero_crossover_points_mean_no_crossover() {
        let mut rng = get_rng(random_seed());
        let operator = Crossover::new(ListMater::new()).with_points(ConstantInt::new(0));
        let selection = vec![vec![1, 1, 1, 1], vec![2, 2, 2, 2]];

        let mut offspring = operator.apply(selection.clone(), &mut rng);

        offspring.sort();
        assert_eq!(offspring, selection);
    }

    #[test]
    fn odd_selection_length_is_preserved() {
        let mut rng = get_rng(random_seed());
        let operator = Crossover::new(ListMater::new());

        for size in [1usize, 3, 5, 99] {
            let selection: Vec<Vec<i32>> = (0..size).map(|i| vec![i as i32; 4]).collect();
            let offspring = operator.apply(selection, &mut rng);
            assert_eq!(offspring.len(), size);
        }
    }
}
