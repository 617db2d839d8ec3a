pub mod jsf;

pub use jsf::{Jsf32, Jsf64};

/// Default generator used across the engine
pub type Random = Jsf64;
