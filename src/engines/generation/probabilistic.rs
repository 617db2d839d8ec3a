use super::creator::{clamp_target, initialize_node, to_postfix, Pending, TreeCreator};
use crate::data::Variable;
use crate::functions::Grammar;
use crate::tree::Tree;
use rand::Rng;

/// Probabilistic tree creator (PTC2).
///
/// Keeps a pool of open child slots and fills one picked uniformly at
/// random each step. Function symbols are preferred while the length budget
/// has room; once the budget or the depth limit is reached slots are closed
/// with leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbabilisticTreeCreator {
    max_length: usize,
}

impl ProbabilisticTreeCreator {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length: max_length.max(1),
        }
    }
}

impl TreeCreator for ProbabilisticTreeCreator {
    fn create<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        grammar: &Grammar,
        variables: &[Variable],
        target_length: usize,
        max_depth: usize,
    ) -> Tree {
        let max_depth = max_depth.max(1);
        let target = clamp_target(target_length, self.max_length);
        let (min_fa, max_fa) = grammar.function_arity_limits();

        let (min_arity, max_arity) = if target == 1 || max_depth == 1 {
            (0, 0)
        } else {
            (min_fa.min(target - 1), max_fa.min(target - 1))
        };

        let mut root = grammar.sample_random_symbol(rng, min_arity, max_arity);
        initialize_node(rng, &mut root, variables);

        let mut length = 1 + root.arity;
        let mut open: Vec<usize> = vec![0; root.arity];
        let mut pending = Vec::with_capacity(target);
        pending.push(Pending::new(root, 1));

        // `open` holds the parent index of every unfilled slot
        while !open.is_empty() {
            let parent = open.swap_remove(rng.gen_range(0..open.len()));
            let depth = pending[parent].depth + 1;

            let max_arity = if depth >= max_depth {
                0
            } else {
                max_fa.min(target - length)
            };
            let min_arity = min_fa.min(max_arity);

            let mut child = grammar.sample_random_symbol(rng, min_arity, max_arity);
            initialize_node(rng, &mut child, variables);
            length += child.arity;

            let index = pending.len();
            open.extend(std::iter::repeat(index).take(child.arity));
            pending.push(Pending::new(child, depth));
            pending[parent].children.push(index);
        }

        log::debug!("ptc2 tree: target {} realized {} nodes", target, length);
        Tree::new(to_postfix(&pending))
    }

    fn max_length(&self) -> usize {
        self.max_length
    }
}
