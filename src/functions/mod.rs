pub mod grammar;

pub use grammar::Grammar;
