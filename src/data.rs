//! CSV loading utilities

use crate::error::{Result, ScoreprepError};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Load a header-rowed CSV file into a DataFrame.
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| ScoreprepError::Data(format!("cannot open '{}': {e}", path.display())))?;

    let reader = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .into_reader_with_file_handle(file);

    reader
        .finish()
        .map_err(|e| ScoreprepError::Data(format!("cannot parse '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "a,b,c").unwrap();
        writeln!(file, "1,2,x").unwrap();
        writeln!(file, "4,5,y").unwrap();

        let df = load_csv(file.path()).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = load_csv("no/such/file.csv").unwrap_err();
        assert!(matches!(err, ScoreprepError::Data(_)));
    }
}
