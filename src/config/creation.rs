use super::traits::ConfigSection;
use crate::engines::generation::LengthDistribution;
use crate::error::{Result, TreegpError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatorKind {
    #[default]
    Balanced,
    Probabilistic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatorConfig {
    pub kind: CreatorKind,
    pub min_length: usize,
    pub max_length: usize,
    pub max_depth: usize,
    /// Only used by the balanced creator
    pub irregularity_bias: f64,
}

impl Default for CreatorConfig {
    fn default() -> Self {
        Self {
            kind: CreatorKind::Balanced,
            min_length: 1,
            max_length: 50,
            max_depth: 10,
            irregularity_bias: 0.0,
        }
    }
}

impl CreatorConfig {
    pub fn length_distribution(&self) -> LengthDistribution {
        LengthDistribution::Uniform {
            min: self.min_length,
            max: self.max_length,
        }
    }
}

impl ConfigSection for CreatorConfig {
    fn section_name() -> &'static str {
        "creator"
    }

    fn validate(&self) -> Result<()> {
        if self.min_length == 0 {
            return Err(TreegpError::Configuration(
                "Minimum tree length must be at least 1".to_string(),
            ));
        }
        if self.min_length > self.max_length {
            return Err(TreegpError::Configuration(format!(
                "Minimum tree length {} exceeds maximum {}",
                self.min_length, self.max_length
            )));
        }
        if self.max_depth == 0 {
            return Err(TreegpError::Configuration(
                "Maximum tree depth must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.irregularity_bias) {
            return Err(TreegpError::Configuration(
                "Irregularity bias must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}
