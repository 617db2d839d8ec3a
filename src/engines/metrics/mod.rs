pub mod regression;
pub mod stats;

pub use regression::{mean_squared_error, normalized_mse, pearson_r, r_squared};
pub use stats::MeanVariance;
