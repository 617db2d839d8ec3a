pub mod balanced;
pub mod creator;
pub mod population;
pub mod probabilistic;

pub use balanced::BalancedTreeCreator;
pub use creator::{LengthDistribution, TreeCreator};
pub use population::{best_index, evaluate_population, initialize_population};
pub use probabilistic::ProbabilisticTreeCreator;
