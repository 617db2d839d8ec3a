pub mod node;
pub mod postfix;

pub use node::{Node, NodeType};
pub use postfix::{Children, Tree};
