use treegp::data::{hash_name, Dataset};
use treegp::engines::evaluation::{evaluate, Dual, ResidualEvaluator};
use treegp::engines::generation::{BalancedTreeCreator, ProbabilisticTreeCreator, TreeCreator};
use treegp::functions::Grammar;
use treegp::random::Jsf64;
use treegp::tree::{Node, NodeType, Tree};
use treegp::types::Range;

fn dataset() -> Dataset {
    let x1: Vec<f64> = (0..300).map(|i| (i as f64 * 0.37).sin() * 5.0).collect();
    let x2: Vec<f64> = (0..300).map(|i| 1.0 + (i % 13) as f64 * 0.5).collect();
    let y: Vec<f64> = x1.iter().zip(&x2).map(|(a, b)| a * b - 1.0).collect();
    Dataset::from_columns(vec![("x1", x1), ("x2", x2), ("y", y)]).unwrap()
}

fn binary(op: NodeType) -> Tree {
    Tree::new(vec![
        Node::variable(hash_name("x1"), 1.0),
        Node::variable(hash_name("x2"), 1.0),
        Node::new(op),
    ])
}

#[test]
fn test_binary_operations_match_columns() {
    let ds = dataset();
    let x1 = ds.values_by_name("x1").unwrap();
    let x2 = ds.values_by_name("x2").unwrap();
    let range = Range::new(17, 250);

    // the first child sits right before its parent, so [x1, x2, op] is x2 op x1
    let cases: [(NodeType, fn(f64, f64) -> f64); 4] = [
        (NodeType::Add, |a, b| b + a),
        (NodeType::Sub, |a, b| b - a),
        (NodeType::Mul, |a, b| b * a),
        (NodeType::Div, |a, b| b / a),
    ];

    for (op, expected) in cases {
        let out = evaluate::<f64>(&binary(op), &ds, range, None);
        assert_eq!(out.len(), range.size());
        for (k, v) in out.iter().enumerate() {
            let row = range.start + k;
            let want = expected(x1[row], x2[row]);
            if want.is_finite() {
                assert!((v - want).abs() <= 1e-9 * want.abs().max(1.0), "{:?} row {}", op, row);
            }
        }
    }
}

#[test]
fn test_division_by_zero_stays_finite() {
    let ds = dataset();
    // x1 / (x2 - x2)
    let tree = Tree::new(vec![
        Node::variable(hash_name("x2"), 1.0),
        Node::variable(hash_name("x2"), 1.0),
        Node::new(NodeType::Sub),
        Node::variable(hash_name("x1"), 1.0),
        Node::new(NodeType::Div),
    ]);
    let out = evaluate::<f64>(&tree, &ds, ds.full_range(), None);
    assert!(out.iter().all(|v| v.is_finite()));
    assert!(out.iter().any(|&v| v == f64::MAX));

    let tree = Tree::new(vec![
        Node::constant(-3.0),
        Node::new(NodeType::Log),
        Node::new(NodeType::Sqrt),
    ]);
    let out = evaluate::<f32>(&tree, &ds, Range::new(0, 10), None);
    assert!(out.iter().all(|&v| v == f32::MAX));
}

#[test]
fn test_random_trees_always_finite() {
    let ds = dataset();
    let vars = ds.input_variables("y");
    let grammar = Grammar::full();
    let balanced = BalancedTreeCreator::new(40, 0.2);
    let ptc2 = ProbabilisticTreeCreator::new(40);
    let mut rng = Jsf64::new(2024);

    for target in 1..=40 {
        let a = balanced.create(&mut rng, &grammar, &vars, target, 8);
        let b = ptc2.create(&mut rng, &grammar, &vars, target, 8);
        for tree in [a, b] {
            let out = evaluate::<f64>(&tree, &ds, ds.full_range(), None);
            assert!(out.iter().all(|v| v.is_finite()));
        }
    }
}

#[test]
fn test_parameters_equal_to_coefficients_reproduce_output() {
    let ds = dataset();
    let vars = ds.input_variables("y");
    let creator = BalancedTreeCreator::new(30, 0.0);
    let grammar = Grammar::full();
    let mut rng = Jsf64::new(77);

    for _ in 0..20 {
        let tree = creator.create(&mut rng, &grammar, &vars, 25, 10);
        let parameters = tree.coefficients();
        let stored = evaluate::<f64>(&tree, &ds, ds.full_range(), None);
        let substituted = evaluate(&tree, &ds, ds.full_range(), Some(parameters.as_slice()));
        assert_eq!(stored, substituted);
    }
}

#[test]
fn test_dual_instantiation_carries_derivative() {
    let ds = dataset();
    // w * x1 squared, d/dw = 2 * w * x1^2
    let tree = Tree::new(vec![
        Node::variable(hash_name("x1"), 3.0),
        Node::new(NodeType::Square),
    ]);
    let params = [Dual::variable(3.0)];
    let out = evaluate(&tree, &ds, Range::new(0, 100), Some(&params[..]));
    let x1 = ds.values_by_name("x1").unwrap();

    for (k, d) in out.iter().enumerate() {
        let x = x1[k];
        assert!((d.val - 9.0 * x * x).abs() < 1e-9);
        assert!((d.eps - 6.0 * x * x).abs() < 1e-9);
    }
}

#[test]
fn test_jacobian_matches_finite_differences() {
    let ds = dataset();
    // w1 * x1 * w2 * x2 + c
    let tree = Tree::new(vec![
        Node::constant(-1.0),
        Node::variable(hash_name("x2"), 0.5),
        Node::variable(hash_name("x1"), 2.0),
        Node::new(NodeType::Mul),
        Node::new(NodeType::Add),
    ]);
    let range = Range::new(0, 80);
    let target = &ds.values_by_name("y").unwrap()[range.start..range.end];
    let eval = ResidualEvaluator::new(&tree, &ds, target, range);

    let params = tree.coefficients();
    let jac = eval.jacobian(&params);
    assert_eq!(jac.columns.len(), eval.num_parameters());
    assert_eq!(jac.residuals.len(), eval.num_residuals());
    // the coefficients fit the target exactly
    assert!(jac.residuals.iter().all(|r| r.abs() < 1e-9));

    let h = 1e-6;
    for j in 0..params.len() {
        let mut plus = params.clone();
        let mut minus = params.clone();
        plus[j] += h;
        minus[j] -= h;

        let mut rp = vec![0.0; eval.num_residuals()];
        let mut rm = vec![0.0; eval.num_residuals()];
        eval.residuals(Some(plus.as_slice()), &mut rp);
        eval.residuals(Some(minus.as_slice()), &mut rm);

        for k in 0..rp.len() {
            let numeric = (rp[k] - rm[k]) / (2.0 * h);
            assert!((jac.columns[j][k] - numeric).abs() < 1e-5, "param {} row {}", j, k);
        }
    }
}
