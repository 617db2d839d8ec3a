use super::traits::ConfigSection;
use crate::error::{Result, TreegpError};
use crate::types::Range;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// CSV file with a header row
    pub dataset: PathBuf,
    /// Name of the target column
    pub target: String,
    /// Rows used for fitness as `"start:end"`; all rows when absent
    pub training_range: Option<String>,
    pub population_size: usize,
    pub seed: u64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("data.csv"),
            target: "y".to_string(),
            training_range: None,
            population_size: 1000,
            seed: 0,
        }
    }
}

impl EvaluationConfig {
    /// Resolves the training range against a dataset with `rows` rows.
    pub fn training_range(&self, rows: usize) -> Result<Range> {
        match &self.training_range {
            Some(s) => s.parse(),
            None => Ok(Range::new(0, rows)),
        }
    }
}

impl ConfigSection for EvaluationConfig {
    fn section_name() -> &'static str {
        "evaluation"
    }

    fn validate(&self) -> Result<()> {
        if self.target.is_empty() {
            return Err(TreegpError::Configuration(
                "Target column name must not be empty".to_string(),
            ));
        }
        if self.population_size == 0 {
            return Err(TreegpError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if let Some(range) = &self.training_range {
            let range: Range = range.parse()?;
            if range.is_empty() {
                return Err(TreegpError::Configuration(format!(
                    "Training range {} is empty",
                    range
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_range_resolution() {
        let mut config = EvaluationConfig::default();
        assert_eq!(config.training_range(120).unwrap(), Range::new(0, 120));

        config.training_range = Some("10:90".to_string());
        assert_eq!(config.training_range(120).unwrap(), Range::new(10, 90));
    }

    #[test]
    fn test_rejects_bad_range() {
        let config = EvaluationConfig {
            training_range: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EvaluationConfig {
            training_range: Some("5:5".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
