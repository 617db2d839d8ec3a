use crate::data::Dataset;
use crate::tree::{NodeType, Tree};
use std::fmt::Write;

/// Renders trees as fully parenthesized infix expressions.
///
/// Variables print as `weight * name`, binary nodes as
/// `(first op second)` matching the evaluation order.
pub struct InfixFormatter;

impl InfixFormatter {
    pub fn format(tree: &Tree, dataset: &Dataset, precision: usize) -> String {
        let mut out = String::new();
        if !tree.is_empty() {
            Self::format_node(tree, tree.len() - 1, dataset, precision, &mut out);
        }
        out
    }

    fn format_node(tree: &Tree, i: usize, dataset: &Dataset, precision: usize, out: &mut String) {
        let node = &tree.nodes()[i];
        let mut children = tree.children(i);

        match node.node_type {
            NodeType::Constant => {
                let _ = write!(out, "{:.*}", precision, node.value);
            }
            NodeType::Variable => {
                let _ = match dataset.get_index(node.hash_value) {
                    Some(index) => write!(
                        out,
                        "{:.*} * {}",
                        precision,
                        node.value,
                        dataset.variables()[index].name
                    ),
                    None => write!(out, "{:.*} * <{:#x}>", precision, node.value, node.hash_value),
                };
            }
            NodeType::Add | NodeType::Sub | NodeType::Mul | NodeType::Div => {
                out.push('(');
                if let Some(first) = children.next() {
                    Self::format_node(tree, first, dataset, precision, out);
                }
                let _ = write!(out, " {} ", node.node_type.name());
                if let Some(second) = children.next() {
                    Self::format_node(tree, second, dataset, precision, out);
                }
                out.push(')');
            }
            _ => {
                out.push_str(node.node_type.name());
                out.push('(');
                if let Some(child) = children.next() {
                    Self::format_node(tree, child, dataset, precision, out);
                }
                out.push(')');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::hash_name;
    use crate::tree::Node;

    #[test]
    fn test_format_expression() {
        let ds = Dataset::from_columns(vec![("x", vec![1.0]), ("y", vec![2.0])]).unwrap();
        // [x, y, Sub] is y - x
        let tree = Tree::new(vec![
            Node::variable(hash_name("x"), 1.0),
            Node::variable(hash_name("y"), 2.0),
            Node::new(NodeType::Sub),
            Node::new(NodeType::Exp),
        ]);
        assert_eq!(
            InfixFormatter::format(&tree, &ds, 2),
            "exp((2.00 * y - 1.00 * x))"
        );
    }

    #[test]
    fn test_format_constant_and_empty() {
        let ds = Dataset::from_columns(vec![("x", vec![1.0])]).unwrap();
        let tree = Tree::new(vec![Node::constant(0.5)]);
        assert_eq!(InfixFormatter::format(&tree, &ds, 3), "0.500");
        assert_eq!(InfixFormatter::format(&Tree::default(), &ds, 3), "");
    }
}
