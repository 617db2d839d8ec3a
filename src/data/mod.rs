pub mod connectors;
pub mod dataset;

pub use connectors::{CsvConnector, DataValidator};
pub use dataset::{hash_name, Dataset, Variable};
