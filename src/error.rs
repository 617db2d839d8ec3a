use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreegpError {
    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Grammar error: {0}")]
    Grammar(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, TreegpError>;
