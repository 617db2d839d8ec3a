use crate::types::Scalar;
use serde::{Deserialize, Serialize};

/// Symbol kind of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeType {
    Constant,
    Variable,
    Add,
    Sub,
    Mul,
    Div,
    Log,
    Exp,
    Sin,
    Cos,
    Tan,
    Sqrt,
    Cbrt,
    Square,
}

impl NodeType {
    pub const ALL: [NodeType; 14] = [
        NodeType::Constant,
        NodeType::Variable,
        NodeType::Add,
        NodeType::Sub,
        NodeType::Mul,
        NodeType::Div,
        NodeType::Log,
        NodeType::Exp,
        NodeType::Sin,
        NodeType::Cos,
        NodeType::Tan,
        NodeType::Sqrt,
        NodeType::Cbrt,
        NodeType::Square,
    ];

    pub fn arity(&self) -> usize {
        match self {
            Self::Constant | Self::Variable => 0,
            Self::Add | Self::Sub | Self::Mul | Self::Div => 2,
            Self::Log
            | Self::Exp
            | Self::Sin
            | Self::Cos
            | Self::Tan
            | Self::Sqrt
            | Self::Cbrt
            | Self::Square => 1,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Constant | Self::Variable)
    }

    /// Leaves and the four binary arithmetic operations
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::Constant | Self::Variable | Self::Add | Self::Sub | Self::Mul | Self::Div
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Variable => "variable",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Log => "log",
            Self::Exp => "exp",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Square => "square",
        }
    }
}

/// One operation or leaf of a flattened tree.
///
/// `length`, `depth` and `parent` are derived fields; they are only
/// meaningful after [`Tree::update_nodes`](super::Tree::update_nodes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub node_type: NodeType,
    pub arity: usize,
    /// Number of descendants, excluding the node itself
    pub length: usize,
    /// Root depth is 1
    pub depth: usize,
    /// Weight for variables, value for constants
    pub value: Scalar,
    /// Column identifier for variables, structural hash otherwise
    pub hash_value: u64,
    pub calculated_hash_value: u64,
    pub parent: Option<usize>,
    pub is_enabled: bool,
}

impl Node {
    pub fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            arity: node_type.arity(),
            length: 0,
            depth: 1,
            value: 1.0,
            hash_value: node_type as u64,
            calculated_hash_value: node_type as u64,
            parent: None,
            is_enabled: true,
        }
    }

    pub fn constant(value: Scalar) -> Self {
        Self {
            value,
            ..Self::new(NodeType::Constant)
        }
    }

    pub fn variable(hash: u64, weight: Scalar) -> Self {
        Self {
            value: weight,
            hash_value: hash,
            calculated_hash_value: hash,
            ..Self::new(NodeType::Variable)
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.arity == 0
    }

    pub fn is_constant(&self) -> bool {
        self.node_type == NodeType::Constant
    }

    pub fn is_variable(&self) -> bool {
        self.node_type == NodeType::Variable
    }

    pub fn name(&self) -> &'static str {
        self.node_type.name()
    }
}
