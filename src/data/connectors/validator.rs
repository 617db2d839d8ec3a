use crate::error::{Result, TreegpError};
use polars::prelude::*;
use std::collections::HashMap;

pub struct DataValidator;

impl DataValidator {
    /// Every column must hold numbers
    pub fn validate_numeric(df: &DataFrame) -> Result<()> {
        for column in df.get_columns() {
            if !matches!(
                column.dtype(),
                DataType::Float64
                    | DataType::Float32
                    | DataType::Int64
                    | DataType::Int32
                    | DataType::Int16
                    | DataType::Int8
                    | DataType::UInt64
                    | DataType::UInt32
                    | DataType::UInt16
                    | DataType::UInt8
            ) {
                return Err(TreegpError::DataLoading(format!(
                    "Column '{}' must be numeric, found {:?}",
                    column.name(),
                    column.dtype()
                )));
            }
        }
        Ok(())
    }

    pub fn validate_minimum_rows(df: &DataFrame, min_rows: usize) -> Result<()> {
        if df.height() < min_rows {
            return Err(TreegpError::DataLoading(format!(
                "Insufficient data: {} rows (minimum {})",
                df.height(),
                min_rows
            )));
        }
        Ok(())
    }

    /// Null count per column, only columns that have any
    pub fn check_nulls(df: &DataFrame) -> HashMap<String, usize> {
        df.get_columns()
            .iter()
            .filter(|c| c.null_count() > 0)
            .map(|c| (c.name().to_string(), c.null_count()))
            .collect()
    }
}
