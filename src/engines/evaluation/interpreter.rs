//! Batch interpreter for postfix trees.
//!
//! Rows are processed in batches of [`BATCH_SIZE`]. Each node owns one
//! batch-wide column in a scratch buffer; a single pass over the postfix
//! sequence per batch fills every column from its children's columns, and
//! the root column is copied to the output.

use super::numeric::Numeric;
use crate::data::Dataset;
use crate::tree::{Node, NodeType, Tree};
use crate::types::Range;

pub const BATCH_SIZE: usize = 64;

/// Evaluates `tree` over `range`, returning one value per row.
///
/// See [`evaluate_into`].
pub fn evaluate<T: Numeric>(
    tree: &Tree,
    dataset: &Dataset,
    range: Range,
    parameters: Option<&[T]>,
) -> Vec<T> {
    let mut result = vec![T::from_scalar(0.0); range.size()];
    evaluate_into(tree, dataset, range, parameters, &mut result);
    result
}

/// Evaluates `tree` over `range` into `result` (`range.size()` values).
///
/// When `parameters` is given, the i-th leaf in postfix order takes its
/// coefficient from `parameters[i]` instead of its stored value. Every value
/// written to `result` is finite: NaN and infinities become
/// [`Numeric::max_finite`].
///
/// The tree must be well formed and its variables must exist in `dataset`;
/// the range must lie inside the dataset.
pub fn evaluate_into<T: Numeric>(
    tree: &Tree,
    dataset: &Dataset,
    range: Range,
    parameters: Option<&[T]>,
    result: &mut [T],
) {
    let nodes = tree.nodes();
    debug_assert_eq!(result.len(), range.size());
    debug_assert!(parameters.map_or(true, |p| p.len() >= tree.leaf_count()));
    debug_assert!(range.end <= dataset.rows());

    if nodes.is_empty() {
        result.fill(T::max_finite());
        return;
    }

    let n = nodes.len();
    let mut buffer = vec![T::from_scalar(0.0); BATCH_SIZE * n];

    // (column index, weight) per variable node
    let mut variables: Vec<Option<(usize, T)>> = vec![None; n];
    let mut nonlinear = false;
    let mut param = 0;

    for (i, node) in nodes.iter().enumerate() {
        nonlinear |= !node.node_type.is_arithmetic();
        if !node.is_leaf() {
            continue;
        }

        let coefficient = match parameters {
            Some(p) => p[param],
            None => T::from_scalar(node.value),
        }
        .finite_or_max();
        param += 1;

        match node.node_type {
            NodeType::Variable => {
                let index = dataset.get_index(node.hash_value);
                debug_assert!(index.is_some(), "variable {:#x} not in dataset", node.hash_value);
                match index {
                    Some(column) => variables[i] = Some((column, coefficient)),
                    None => column_mut(&mut buffer, i).fill(T::max_finite()),
                }
            }
            _ => column_mut(&mut buffer, i).fill(coefficient),
        }
    }

    let num_rows = range.size();
    let root = n - 1;

    for row in (0..num_rows).step_by(BATCH_SIZE) {
        let remaining = BATCH_SIZE.min(num_rows - row);

        for (i, node) in nodes.iter().enumerate() {
            match node.node_type {
                NodeType::Constant => {}
                NodeType::Variable => {
                    if let Some((column, weight)) = variables[i] {
                        let start = range.start + row;
                        let values = &dataset.values(column)[start..start + remaining];
                        let out = &mut column_mut(&mut buffer, i)[..remaining];
                        for (o, &v) in out.iter_mut().zip(values) {
                            *o = weight * T::from_scalar(v);
                        }
                    }
                }
                NodeType::Add => binary(&mut buffer, nodes, i, remaining, |a, b| a + b),
                NodeType::Sub => binary(&mut buffer, nodes, i, remaining, |a, b| a - b),
                NodeType::Mul => binary(&mut buffer, nodes, i, remaining, |a, b| a * b),
                NodeType::Div => binary(&mut buffer, nodes, i, remaining, |a, b| a / b),
                t => {
                    if nonlinear {
                        match t {
                            NodeType::Log => unary(&mut buffer, i, remaining, T::ln),
                            NodeType::Exp => unary(&mut buffer, i, remaining, T::exp),
                            NodeType::Sin => unary(&mut buffer, i, remaining, T::sin),
                            NodeType::Cos => unary(&mut buffer, i, remaining, T::cos),
                            NodeType::Tan => unary(&mut buffer, i, remaining, T::tan),
                            NodeType::Sqrt => unary(&mut buffer, i, remaining, T::sqrt),
                            NodeType::Cbrt => unary(&mut buffer, i, remaining, T::cbrt),
                            NodeType::Square => unary(&mut buffer, i, remaining, T::square),
                            _ => {}
                        }
                    }
                }
            }
        }

        let out = &mut result[row..row + remaining];
        for (o, &v) in out.iter_mut().zip(&column(&buffer, root)[..remaining]) {
            *o = v.finite_or_max();
        }
    }
}

#[inline]
fn column<T>(buffer: &[T], i: usize) -> &[T] {
    &buffer[i * BATCH_SIZE..(i + 1) * BATCH_SIZE]
}

#[inline]
fn column_mut<T>(buffer: &mut [T], i: usize) -> &mut [T] {
    &mut buffer[i * BATCH_SIZE..(i + 1) * BATCH_SIZE]
}

/// `out[i] = op(first, second)`, first child at `i - 1`
#[inline]
fn binary<T: Numeric>(buffer: &mut [T], nodes: &[Node], i: usize, len: usize, op: impl Fn(T, T) -> T) {
    let first = i - 1;
    let second = first - 1 - nodes[first].length;
    let (children, rest) = buffer.split_at_mut(i * BATCH_SIZE);
    let a = &column(children, first)[..len];
    let b = &column(children, second)[..len];
    for ((o, &x), &y) in rest[..len].iter_mut().zip(a).zip(b) {
        *o = op(x, y);
    }
}

#[inline]
fn unary<T: Numeric>(buffer: &mut [T], i: usize, len: usize, op: impl Fn(T) -> T) {
    let (children, rest) = buffer.split_at_mut(i * BATCH_SIZE);
    let a = &column(children, i - 1)[..len];
    for (o, &x) in rest[..len].iter_mut().zip(a) {
        *o = op(x);
    }
}
