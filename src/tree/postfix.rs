use super::node::Node;
use crate::error::{Result, TreegpError};
use crate::types::Scalar;

/// Expression tree stored as a postfix sequence of nodes.
///
/// The children of node `i` occupy the contiguous block right before it:
/// the first child is at `i - 1`, every following child sits at
/// `previous - 1 - previous.length`. The last node is the root. No other
/// structural links exist; everything is recoverable from `length`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Wraps a postfix node sequence and recomputes the derived fields.
    pub fn new(nodes: Vec<Node>) -> Self {
        let mut tree = Self { nodes };
        tree.update_nodes();
        tree
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable access to the nodes. Call [`Tree::update_nodes`] after any
    /// structural change.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.last()
    }

    /// Number of levels; a single leaf has depth 1
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Recomputes `length`, `parent` and `depth` for every node.
    ///
    /// Lengths are filled children-first, depths root-first. Running it twice
    /// leaves the tree unchanged.
    pub fn update_nodes(&mut self) -> &mut Self {
        for i in 0..self.nodes.len() {
            let arity = self.nodes[i].arity;
            self.nodes[i].parent = None;
            if arity == 0 {
                self.nodes[i].length = 0;
                continue;
            }

            let mut length = 0;
            let mut cursor = i;
            for _ in 0..arity {
                let child = cursor - 1;
                length += 1 + self.nodes[child].length;
                self.nodes[child].parent = Some(i);
                cursor = child - self.nodes[child].length;
            }
            self.nodes[i].length = length;
        }

        for i in (0..self.nodes.len()).rev() {
            self.nodes[i].depth = match self.nodes[i].parent {
                Some(p) => self.nodes[p].depth + 1,
                None => 1,
            };
        }
        self
    }

    /// Indices of the direct children of node `i`, first child first.
    pub fn children(&self, i: usize) -> Children<'_> {
        Children {
            nodes: &self.nodes,
            cursor: i,
            remaining: self.nodes[i].arity,
        }
    }

    /// Index range covering the subtree rooted at `i`, the node included
    pub fn subtree_range(&self, i: usize) -> std::ops::Range<usize> {
        (i - self.nodes[i].length)..(i + 1)
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Leaf values in postfix order, the layout of an evaluation parameter
    /// vector.
    pub fn coefficients(&self) -> Vec<Scalar> {
        self.nodes
            .iter()
            .filter(|n| n.is_leaf())
            .map(|n| n.value)
            .collect()
    }

    pub fn set_coefficients(&mut self, coefficients: &[Scalar]) {
        debug_assert_eq!(coefficients.len(), self.leaf_count());
        for (node, &value) in self
            .nodes
            .iter_mut()
            .filter(|n| n.is_leaf())
            .zip(coefficients)
        {
            node.value = value;
        }
    }

    /// Checks the postfix invariants against the stored derived fields.
    pub fn validate(&self) -> Result<()> {
        let n = self.nodes.len();
        if n == 0 {
            return Err(TreegpError::InvalidTree("tree has no nodes".to_string()));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if node.arity != node.node_type.arity() {
                return Err(TreegpError::InvalidTree(format!(
                    "node {} ({}) has arity {}, expected {}",
                    i,
                    node.name(),
                    node.arity,
                    node.node_type.arity()
                )));
            }
            if node.length > i {
                return Err(TreegpError::InvalidTree(format!(
                    "node {} claims {} descendants but only {} nodes precede it",
                    i, node.length, i
                )));
            }

            let mut covered = 0;
            let mut found = 0;
            for child in self.children(i) {
                let c = &self.nodes[child];
                if c.parent != Some(i) || c.depth != node.depth + 1 {
                    return Err(TreegpError::InvalidTree(format!(
                        "child {} of node {} has inconsistent parent or depth",
                        child, i
                    )));
                }
                covered += 1 + c.length;
                found += 1;
            }
            if found != node.arity || covered != node.length {
                return Err(TreegpError::InvalidTree(format!(
                    "node {} children cover {} nodes, length is {}",
                    i, covered, node.length
                )));
            }
        }

        let root = &self.nodes[n - 1];
        if root.length != n - 1 || root.parent.is_some() || root.depth != 1 {
            return Err(TreegpError::InvalidTree(format!(
                "root spans {} descendants in a tree of {} nodes",
                root.length, n
            )));
        }
        Ok(())
    }
}

impl From<Vec<Node>> for Tree {
    fn from(nodes: Vec<Node>) -> Self {
        Self::new(nodes)
    }
}

/// Iterator over the direct children of a node, see [`Tree::children`]
pub struct Children<'a> {
    nodes: &'a [Node],
    cursor: usize,
    remaining: usize,
}

impl Iterator for Children<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let child = self.cursor.checked_sub(1)?;
        self.cursor = child.checked_sub(self.nodes[child].length)?;
        self.remaining -= 1;
        Some(child)
    }
}
