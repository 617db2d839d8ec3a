use super::creator::{LengthDistribution, TreeCreator};
use crate::data::{Dataset, Variable};
use crate::engines::evaluation::evaluate;
use crate::engines::metrics::r_squared;
use crate::functions::Grammar;
use crate::random::Random;
use crate::tree::Tree;
use crate::types::{Range, Scalar};
use rand::RngCore;
use rayon::prelude::*;

/// Creates `size` trees in parallel.
///
/// Every individual draws its seed from `rng` up front and builds its tree
/// from a private generator, so the result depends only on the master
/// stream and not on thread scheduling.
pub fn initialize_population<C: TreeCreator>(
    creator: &C,
    grammar: &Grammar,
    variables: &[Variable],
    lengths: LengthDistribution,
    max_depth: usize,
    size: usize,
    rng: &mut Random,
) -> Vec<Tree> {
    let seeds: Vec<u64> = (0..size).map(|_| rng.next_u64()).collect();

    seeds
        .into_par_iter()
        .map(|seed| {
            let mut local = Random::new(seed);
            let target = lengths.sample(&mut local);
            creator.create(&mut local, grammar, variables, target, max_depth)
        })
        .collect()
}

/// Scores every tree by the squared correlation between its output over
/// `range` and `target` (the target values of the same rows).
pub fn evaluate_population(
    trees: &[Tree],
    dataset: &Dataset,
    target: &[Scalar],
    range: Range,
) -> Vec<Scalar> {
    trees
        .par_iter()
        .map(|tree| {
            let predicted = evaluate::<Scalar>(tree, dataset, range, None);
            r_squared(&predicted, target)
        })
        .collect()
}

/// Index of the highest fitness, `None` for an empty population
pub fn best_index(fitness: &[Scalar]) -> Option<usize> {
    fitness
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
}
