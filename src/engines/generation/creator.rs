use crate::data::Variable;
use crate::functions::Grammar;
use crate::tree::{Node, NodeType, Tree};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Grows random trees bounded by a length budget and a depth limit.
pub trait TreeCreator: Send + Sync {
    /// Builds a tree of roughly `target_length` nodes (clamped to
    /// `[1, max_length]`) whose depth never exceeds `max_depth`.
    fn create<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        grammar: &Grammar,
        variables: &[Variable],
        target_length: usize,
        max_depth: usize,
    ) -> Tree;

    fn max_length(&self) -> usize;
}

/// Distribution of requested tree lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthDistribution {
    Uniform { min: usize, max: usize },
}

impl LengthDistribution {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match *self {
            Self::Uniform { min, max } => rng.gen_range(min.min(max)..=max),
        }
    }
}

/// Node under construction; `children` index into the same pending list
#[derive(Debug, Clone)]
pub(crate) struct Pending {
    pub node: Node,
    pub depth: usize,
    pub children: Vec<usize>,
}

impl Pending {
    pub fn new(node: Node, depth: usize) -> Self {
        Self {
            children: Vec::with_capacity(node.arity),
            node,
            depth,
        }
    }
}

pub(crate) fn clamp_target(target_length: usize, max_length: usize) -> usize {
    target_length.clamp(1, max_length.max(1))
}

/// Variables get a uniformly chosen column; every node gets a standard
/// normal value. Without variables a variable node turns into a constant.
pub(crate) fn initialize_node<R: Rng + ?Sized>(rng: &mut R, node: &mut Node, variables: &[Variable]) {
    if node.is_variable() {
        if variables.is_empty() {
            *node = Node::new(NodeType::Constant);
        } else {
            let variable = &variables[rng.gen_range(0..variables.len())];
            node.hash_value = variable.hash;
            node.calculated_hash_value = variable.hash;
        }
    }
    node.value = rng.sample(StandardNormal);
}

/// Flattens a pending tree rooted at index 0 into postfix order.
///
/// Children are emitted last-to-first so the first recorded child ends up
/// right before its parent.
pub(crate) fn to_postfix(pending: &[Pending]) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(pending.len());
    let mut stack = vec![(0usize, false)];

    while let Some((i, expanded)) = stack.pop() {
        let p = &pending[i];
        if expanded || p.children.is_empty() {
            nodes.push(p.node);
            continue;
        }
        stack.push((i, true));
        stack.extend(p.children.iter().map(|&c| (c, false)));
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Jsf64;

    #[test]
    fn test_to_postfix_order() {
        // add(mul(a, b), c) recorded breadth first: add, mul, c, a, b
        let mut pending = vec![
            Pending::new(Node::new(NodeType::Add), 1),
            Pending::new(Node::new(NodeType::Mul), 2),
            Pending::new(Node::constant(3.0), 2),
            Pending::new(Node::constant(1.0), 3),
            Pending::new(Node::constant(2.0), 3),
        ];
        pending[0].children = vec![1, 2];
        pending[1].children = vec![3, 4];

        let tree = Tree::new(to_postfix(&pending));
        let values: Vec<f64> = tree.nodes().iter().map(|n| n.value).collect();
        assert_eq!(values, vec![3.0, 2.0, 1.0, 1.0, 1.0]);
        assert_eq!(tree.nodes()[4].node_type, NodeType::Add);
        assert_eq!(tree.nodes()[3].node_type, NodeType::Mul);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_clamp_target() {
        assert_eq!(clamp_target(0, 50), 1);
        assert_eq!(clamp_target(80, 50), 50);
        assert_eq!(clamp_target(20, 50), 20);
    }

    #[test]
    fn test_length_distribution_bounds() {
        let dist = LengthDistribution::Uniform { min: 3, max: 9 };
        let mut rng = Jsf64::new(0);
        for _ in 0..200 {
            let len = dist.sample(&mut rng);
            assert!((3..=9).contains(&len));
        }
    }

    #[test]
    fn test_initialize_variable_without_columns() {
        let mut rng = Jsf64::new(0);
        let mut node = Node::new(NodeType::Variable);
        initialize_node(&mut rng, &mut node, &[]);
        assert!(node.is_constant());
    }
}
