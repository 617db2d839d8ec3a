pub mod creation;
pub mod evaluation;
pub mod grammar;
pub mod manager;
pub mod traits;

pub use creation::{CreatorConfig, CreatorKind};
pub use evaluation::EvaluationConfig;
pub use grammar::{GrammarConfig, SymbolFrequency};
pub use manager::{AppConfig, ConfigManager};
pub use traits::ConfigSection;
