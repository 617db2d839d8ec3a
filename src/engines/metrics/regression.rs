// Goodness-of-fit measures between predictions and targets
use super::stats::MeanVariance;
use crate::types::Scalar;

pub fn mean_squared_error(predicted: &[Scalar], target: &[Scalar]) -> Scalar {
    debug_assert_eq!(predicted.len(), target.len());
    let mut calc = MeanVariance::new();
    for (p, t) in predicted.iter().zip(target) {
        let e = p - t;
        calc.add(e * e);
    }
    calc.mean()
}

/// MSE divided by the target variance
pub fn normalized_mse(predicted: &[Scalar], target: &[Scalar]) -> Scalar {
    let variance = MeanVariance::from_values(target).naive_variance();
    if variance == 0.0 {
        return Scalar::MAX;
    }
    mean_squared_error(predicted, target) / variance
}

/// Pearson correlation coefficient; 0 when either side is constant
pub fn pearson_r(x: &[Scalar], y: &[Scalar]) -> Scalar {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len() as f64;
    if n < 2.0 {
        return 0.0;
    }
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return 0.0;
    }
    sxy / (sxx * syy).sqrt()
}

/// Squared Pearson correlation, in `[0, 1]`; non-finite inputs score 0
pub fn r_squared(predicted: &[Scalar], target: &[Scalar]) -> Scalar {
    let r = pearson_r(predicted, target);
    let r2 = r * r;
    if r2.is_finite() {
        r2
    } else {
        0.0
    }
}
