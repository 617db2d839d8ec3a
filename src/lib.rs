pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod functions;
pub mod random;
pub mod tree;
pub mod types;
pub mod utils;

pub use error::{Result, TreegpError};
