use crate::error::TreegpError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scalar type of dataset values and stored node coefficients
pub type Scalar = f64;

/// Half-open `[start, end)` window over dataset rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start must not exceed end");
        Self { start, end }
    }

    pub fn size(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Parses `"start:end"`, e.g. `"0:250"`
impl FromStr for Range {
    type Err = TreegpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TreegpError::Configuration(format!("Could not parse range from \"{}\"", s));

        let (first, last) = s.split_once(':').ok_or_else(invalid)?;
        let start: usize = first.trim().parse().map_err(|_| invalid())?;
        let end: usize = last.trim().parse().map_err(|_| invalid())?;

        if start > end {
            return Err(TreegpError::Configuration(format!(
                "Range start {} exceeds end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }
}
