use crate::error::{Result, TreegpError};
use crate::types::{Range, Scalar};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A usable predictor column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    /// Stable identifier referenced by variable nodes
    pub hash: u64,
    /// Column index inside the dataset
    pub index: usize,
}

/// Hash of a column name, used as the column identifier in variable nodes
pub fn hash_name(name: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}

/// Read-only column-major table of f64 values
#[derive(Debug, Clone)]
pub struct Dataset {
    variables: Vec<Variable>,
    columns: Vec<Vec<Scalar>>,
    rows: usize,
}

impl Dataset {
    /// Builds a dataset from named columns of equal length.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<Scalar>)>) -> Result<Self> {
        let mut variables = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(columns.len());
        let mut rows = None;

        for (index, (name, column)) in columns.into_iter().enumerate() {
            let name = name.into();
            match rows {
                None => rows = Some(column.len()),
                Some(r) if r != column.len() => {
                    return Err(TreegpError::Dataset(format!(
                        "Column '{}' has {} rows, expected {}",
                        name,
                        column.len(),
                        r
                    )));
                }
                _ => {}
            }
            if variables.iter().any(|v: &Variable| v.name == name) {
                return Err(TreegpError::Dataset(format!("Duplicate column '{}'", name)));
            }
            variables.push(Variable {
                hash: hash_name(&name),
                name,
                index,
            });
            values.push(column);
        }

        Ok(Self {
            variables,
            columns: values,
            rows: rows.unwrap_or(0),
        })
    }

    /// Converts every column of a DataFrame to f64. Nulls become NaN.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let mut columns = Vec::with_capacity(df.width());
        for name in df.get_column_names() {
            let column = df.column(name)?.cast(&DataType::Float64)?;
            let values: Vec<Scalar> = column
                .f64()?
                .into_iter()
                .map(|v| v.unwrap_or(Scalar::NAN))
                .collect();
            columns.push((name.to_string(), values));
        }
        Self::from_columns(columns)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Variables usable as predictors for `target`, i.e. all other columns
    pub fn input_variables(&self, target: &str) -> Vec<Variable> {
        self.variables
            .iter()
            .filter(|v| v.name != target)
            .cloned()
            .collect()
    }

    pub fn get_index(&self, hash: u64) -> Option<usize> {
        self.variables.iter().find(|v| v.hash == hash).map(|v| v.index)
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn values(&self, index: usize) -> &[Scalar] {
        &self.columns[index]
    }

    pub fn values_by_name(&self, name: &str) -> Option<&[Scalar]> {
        self.variable(name).map(|v| self.values(v.index))
    }

    pub fn values_by_hash(&self, hash: u64) -> Option<&[Scalar]> {
        self.get_index(hash).map(|i| self.values(i))
    }

    /// Range covering every row
    pub fn full_range(&self) -> Range {
        Range::new(0, self.rows)
    }

    /// Checks that `range` lies inside the table
    pub fn check_range(&self, range: Range) -> Result<()> {
        if range.start > range.end || range.end > self.rows {
            return Err(TreegpError::Dataset(format!(
                "Range {} is outside the dataset ({} rows)",
                range, self.rows
            )));
        }
        Ok(())
    }
}
