use super::dual::Dual;
use super::interpreter::evaluate_into;
use super::numeric::Numeric;
use crate::data::Dataset;
use crate::tree::Tree;
use crate::types::{Range, Scalar};

/// A tree bound to the data it is evaluated on
#[derive(Debug, Clone, Copy)]
pub struct TreeEvaluator<'a> {
    tree: &'a Tree,
    dataset: &'a Dataset,
    range: Range,
}

impl<'a> TreeEvaluator<'a> {
    pub fn new(tree: &'a Tree, dataset: &'a Dataset, range: Range) -> Self {
        Self {
            tree,
            dataset,
            range,
        }
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    pub fn evaluate<T: Numeric>(&self, parameters: Option<&[T]>, out: &mut [T]) {
        evaluate_into(self.tree, self.dataset, self.range, parameters, out);
    }
}

/// Residuals `prediction - target` and their derivatives per parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualJacobian {
    pub residuals: Vec<Scalar>,
    /// One column per parameter, each `residuals.len()` long
    pub columns: Vec<Vec<Scalar>>,
}

/// Residual function for least-squares fitting of leaf coefficients
#[derive(Debug, Clone, Copy)]
pub struct ResidualEvaluator<'a> {
    evaluator: TreeEvaluator<'a>,
    target: &'a [Scalar],
}

impl<'a> ResidualEvaluator<'a> {
    /// `target` holds the target values of the rows in `range`.
    pub fn new(tree: &'a Tree, dataset: &'a Dataset, target: &'a [Scalar], range: Range) -> Self {
        debug_assert_eq!(target.len(), range.size());
        Self {
            evaluator: TreeEvaluator::new(tree, dataset, range),
            target,
        }
    }

    pub fn num_residuals(&self) -> usize {
        self.target.len()
    }

    pub fn num_parameters(&self) -> usize {
        self.evaluator.tree().leaf_count()
    }

    pub fn residuals<T: Numeric>(&self, parameters: Option<&[T]>, out: &mut [T]) {
        self.evaluator.evaluate(parameters, out);
        for (r, &t) in out.iter_mut().zip(self.target) {
            *r = *r - T::from_scalar(t);
        }
    }

    /// Forward-mode Jacobian: one dual-number pass per parameter.
    pub fn jacobian(&self, parameters: &[Scalar]) -> ResidualJacobian {
        let rows = self.num_residuals();

        if parameters.is_empty() {
            let mut residuals = vec![0.0; rows];
            self.residuals::<Scalar>(None, &mut residuals);
            return ResidualJacobian {
                residuals,
                columns: Vec::new(),
            };
        }

        let mut residuals = Vec::new();
        let mut columns = Vec::with_capacity(parameters.len());
        let mut seeded: Vec<Dual<Scalar>> = parameters.iter().map(|&p| Dual::constant(p)).collect();
        let mut out = vec![Dual::constant(0.0); rows];

        for j in 0..parameters.len() {
            seeded[j] = Dual::variable(parameters[j]);
            self.residuals(Some(seeded.as_slice()), &mut out);
            seeded[j] = Dual::constant(parameters[j]);

            if j == 0 {
                residuals = out.iter().map(|d| d.val).collect();
            }
            columns.push(out.iter().map(|d| d.eps).collect());
        }

        ResidualJacobian { residuals, columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::hash_name;
    use crate::tree::{Node, NodeType};

    fn setup() -> (Tree, Dataset) {
        let ds = Dataset::from_columns(vec![
            ("x", vec![1.0, 2.0, 3.0, 4.0]),
            ("y", vec![3.0, 5.0, 7.0, 9.0]),
        ])
        .unwrap();
        // c + w * x
        let tree = Tree::new(vec![
            Node::variable(hash_name("x"), 2.0),
            Node::constant(1.0),
            Node::new(NodeType::Add),
        ]);
        (tree, ds)
    }

    #[test]
    fn test_residuals_zero_at_exact_fit() {
        let (tree, ds) = setup();
        let target = ds.values_by_name("y").unwrap();
        let eval = ResidualEvaluator::new(&tree, &ds, target, ds.full_range());
        let mut out = vec![0.0; 4];
        eval.residuals::<f64>(None, &mut out);
        assert!(out.iter().all(|r| r.abs() < 1e-12));
    }

    #[test]
    fn test_jacobian_of_linear_model() {
        let (tree, ds) = setup();
        let target = ds.values_by_name("y").unwrap();
        let eval = ResidualEvaluator::new(&tree, &ds, target, ds.full_range());

        let jac = eval.jacobian(&[1.0, 0.0]);
        // residual = w * x + c - y
        assert_eq!(jac.columns.len(), 2);
        assert_eq!(jac.columns[0], vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(jac.columns[1], vec![1.0; 4]);
        assert_eq!(jac.residuals, vec![-2.0, -3.0, -4.0, -5.0]);
    }
}
