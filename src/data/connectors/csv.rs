use super::validator::DataValidator;
use crate::data::dataset::Dataset;
use crate::error::{Result, TreegpError};
use polars::prelude::*;
use std::path::Path;

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| TreegpError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load, validate and convert a CSV file into a [`Dataset`]
    pub fn load_dataset<P: AsRef<Path>>(path: P, min_rows: Option<usize>) -> Result<Dataset> {
        let df = Self::load(&path)?;

        DataValidator::validate_numeric(&df)?;
        DataValidator::validate_minimum_rows(&df, min_rows.unwrap_or(1))?;

        // Warn about nulls but don't fail
        let null_report = DataValidator::check_nulls(&df);
        if !null_report.is_empty() {
            log::warn!("Null values detected: {:?}", null_report);
        }

        let dataset = Dataset::from_dataframe(&df)?;
        log::debug!(
            "Loaded {} rows x {} columns from {}",
            dataset.rows(),
            dataset.cols(),
            path.as_ref().display()
        );
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("treegp-{}-{}.csv", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_dataset() {
        let path = write_temp_csv("load", "x1,x2,y\n1.0,2.0,3.0\n4.0,5.0,9.0\n");
        let ds = CsvConnector::load_dataset(&path, None).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.rows(), 2);
        assert_eq!(ds.values_by_name("y"), Some(&[3.0, 9.0][..]));
    }

    #[test]
    fn test_load_dataset_minimum_rows() {
        let path = write_temp_csv("minrows", "x,y\n1,2\n");
        let result = CsvConnector::load_dataset(&path, Some(10));
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(CsvConnector::load("/definitely/not/here.csv").is_err());
    }
}
