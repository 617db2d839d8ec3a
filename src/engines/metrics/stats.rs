use crate::types::Scalar;

/// Streaming mean and variance (Welford-style update on running sums)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanVariance {
    n: f64,
    sum: f64,
    m2: f64,
}

impl MeanVariance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: &[Scalar]) -> Self {
        let mut calc = Self::new();
        for &v in values {
            calc.add(v);
        }
        calc
    }

    pub fn add(&mut self, value: Scalar) {
        if self.n <= 0.0 {
            self.n = 1.0;
            self.sum = value;
            self.m2 = 0.0;
            return;
        }
        let tmp = self.n * value - self.sum;
        let old_n = self.n;
        self.n += 1.0;
        self.sum += value;
        self.m2 += tmp * tmp / (self.n * old_n);
    }

    pub fn add_weighted(&mut self, value: Scalar, weight: Scalar) {
        if weight == 0.0 {
            return;
        }
        if self.n <= 0.0 {
            self.n = weight;
            self.sum = value * weight;
            self.m2 = 0.0;
            return;
        }
        let tmp = self.n * value - self.sum;
        let old_n = self.n;
        self.n += weight;
        self.sum += weight * value;
        self.m2 += weight * tmp * tmp / (self.n * old_n);
    }

    pub fn count(&self) -> f64 {
        self.n
    }

    pub fn mean(&self) -> Scalar {
        self.sum / self.n
    }

    /// Population variance
    pub fn naive_variance(&self) -> Scalar {
        self.m2 / self.n
    }

    /// Unbiased sample variance
    pub fn sample_variance(&self) -> Scalar {
        self.m2 / (self.n - 1.0)
    }

    pub fn sample_std_dev(&self) -> Scalar {
        self.sample_variance().sqrt()
    }
}
