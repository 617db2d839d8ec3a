use super::creator::{clamp_target, initialize_node, to_postfix, Pending, TreeCreator};
use crate::data::Variable;
use crate::functions::Grammar;
use crate::tree::Tree;
use rand::Rng;

/// Grows trees breadth first so that sibling subtrees share the length
/// budget as evenly as the grammar allows.
///
/// `irregularity_bias` is the probability of letting a child close early
/// (become a leaf) while other slots are still open, which produces less
/// symmetric shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedTreeCreator {
    max_length: usize,
    irregularity_bias: f64,
}

impl BalancedTreeCreator {
    pub fn new(max_length: usize, irregularity_bias: f64) -> Self {
        Self {
            max_length: max_length.max(1),
            irregularity_bias: if irregularity_bias.is_finite() {
                irregularity_bias.clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }

    pub fn irregularity_bias(&self) -> f64 {
        self.irregularity_bias
    }
}

impl TreeCreator for BalancedTreeCreator {
    fn create<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        grammar: &Grammar,
        variables: &[Variable],
        target_length: usize,
        max_depth: usize,
    ) -> Tree {
        let max_depth = max_depth.max(1);
        let mut target = clamp_target(target_length, self.max_length);
        let (min_fa, max_fa) = grammar.function_arity_limits();

        // Binary-only grammars can only build odd lengths
        if min_fa > 1 && target % 2 == 0 {
            let up = rng.gen_bool(0.5);
            target = if up && target < self.max_length { target + 1 } else { target - 1 };
        }

        let remaining = target - 1;
        let (min_arity, max_arity) = if max_depth == 1 {
            (0, 0)
        } else {
            (min_fa.min(remaining), max_fa.min(remaining))
        };

        let mut root = grammar.sample_random_symbol(rng, min_arity, max_arity);
        initialize_node(rng, &mut root, variables);

        let mut open_slots = root.arity;
        let mut pending = Vec::with_capacity(target);
        pending.push(Pending::new(root, 1));

        let mut i = 0;
        while i < pending.len() {
            let arity = pending[i].node.arity;
            let child_depth = pending[i].depth + 1;

            for _ in 0..arity {
                let max_arity = if child_depth >= max_depth {
                    0
                } else {
                    max_fa.min(remaining - open_slots)
                };
                let unfilled = open_slots + 1 - pending.len();
                let irregular = unfilled > 1 && rng.gen_bool(self.irregularity_bias);
                let min_arity = if irregular { 0 } else { min_fa.min(max_arity) };

                let mut child = grammar.sample_random_symbol(rng, min_arity, max_arity);
                initialize_node(rng, &mut child, variables);
                open_slots += child.arity;

                let index = pending.len();
                pending.push(Pending::new(child, child_depth));
                pending[i].children.push(index);
            }
            i += 1;
        }

        log::debug!(
            "balanced tree: target {} realized {} nodes",
            target,
            pending.len()
        );
        Tree::new(to_postfix(&pending))
    }

    fn max_length(&self) -> usize {
        self.max_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::hash_name;
    use crate::random::Jsf64;
    use crate::tree::NodeType;

    fn variables() -> Vec<Variable> {
        ["x1", "x2", "x3"]
            .iter()
            .enumerate()
            .map(|(index, name)| Variable {
                name: name.to_string(),
                hash: hash_name(name),
                index,
            })
            .collect()
    }

    #[test]
    fn test_length_and_depth_bounds() {
        let creator = BalancedTreeCreator::new(50, 0.0);
        let grammar = Grammar::full();
        let vars = variables();
        let mut rng = Jsf64::new(1234);

        for target in 1..=50 {
            let tree = creator.create(&mut rng, &grammar, &vars, target, 10);
            assert!(tree.validate().is_ok());
            assert!(tree.len() <= 50);
            assert!(tree.depth() <= 10);
        }
    }

    #[test]
    fn test_arithmetic_grammar_hits_odd_targets() {
        let creator = BalancedTreeCreator::new(64, 0.0);
        let grammar = Grammar::arithmetic();
        let vars = variables();
        let mut rng = Jsf64::new(7);

        for target in [1usize, 3, 7, 15, 31] {
            let tree = creator.create(&mut rng, &grammar, &vars, target, 100);
            assert_eq!(tree.len(), target);
        }
    }

    #[test]
    fn test_even_target_is_adjusted_by_one() {
        let creator = BalancedTreeCreator::new(64, 0.0);
        let grammar = Grammar::arithmetic();
        let vars = variables();
        let mut rng = Jsf64::new(99);

        for _ in 0..20 {
            let tree = creator.create(&mut rng, &grammar, &vars, 20, 100);
            assert!(tree.len() == 19 || tree.len() == 21);
        }
    }

    #[test]
    fn test_depth_one_yields_single_leaf() {
        let creator = BalancedTreeCreator::new(50, 0.5);
        let grammar = Grammar::full();
        let mut rng = Jsf64::new(3);
        let tree = creator.create(&mut rng, &grammar, &variables(), 30, 1);
        assert_eq!(tree.len(), 1);
        assert!(tree.nodes()[0].is_leaf());
    }

    #[test]
    fn test_variables_reference_dataset_columns() {
        let creator = BalancedTreeCreator::new(40, 0.3);
        let grammar = Grammar::arithmetic();
        let vars = variables();
        let hashes: Vec<u64> = vars.iter().map(|v| v.hash).collect();
        let mut rng = Jsf64::new(11);

        let tree = creator.create(&mut rng, &grammar, &vars, 31, 12);
        for node in tree.nodes().iter().filter(|n| n.node_type == NodeType::Variable) {
            assert!(hashes.contains(&node.hash_value));
        }
    }

    #[test]
    fn test_same_seed_same_tree() {
        let creator = BalancedTreeCreator::new(40, 0.2);
        let grammar = Grammar::full();
        let vars = variables();
        let a = creator.create(&mut Jsf64::new(5), &grammar, &vars, 25, 8);
        let b = creator.create(&mut Jsf64::new(5), &grammar, &vars, 25, 8);
        assert_eq!(a, b);
    }
}
