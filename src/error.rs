use crate::layouts::Layout;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML Parsing Error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid character {0:?} for the {1} model")]
    InvalidCharacter(char, Layout),

    #[error("Challenge duration must be positive, got {0}")]
    NonPositiveDuration(f64),

    #[error("Chart Rendering Error: {0}")]
    Chart(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type SmResult<T> = Result<T, MetricsError>;
