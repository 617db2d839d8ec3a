pub mod dual;
pub mod interpreter;
pub mod numeric;
pub mod residual;

pub use dual::Dual;
pub use interpreter::{evaluate, evaluate_into, BATCH_SIZE};
pub use numeric::Numeric;
pub use residual::{ResidualEvaluator, ResidualJacobian, TreeEvaluator};
