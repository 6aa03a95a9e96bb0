//! Fixed feature schema for the student performance dataset

use crate::error::{Result, ScoreprepError};
use polars::prelude::*;

/// Numeric feature columns, in output order
pub const NUMERIC_COLUMNS: [&str; 2] = ["writing_score", "reading_score"];

/// Categorical feature columns, in output order
pub const CATEGORICAL_COLUMNS: [&str; 5] = [
    "gender",
    "race_ethnicity",
    "parental_level_of_education",
    "lunch",
    "test_preparation_course",
];

/// Target column, present in train/test sources but never in the feature matrix
pub const TARGET_COLUMN: &str = "math_score";

/// All feature columns (numeric then categorical)
pub fn feature_columns() -> impl Iterator<Item = &'static str> {
    NUMERIC_COLUMNS.iter().chain(CATEGORICAL_COLUMNS.iter()).copied()
}

/// Validate that `df` contains every required column (case-sensitive).
///
/// With `require_target` set, the target column must be present as well.
/// Fails with a `Schema` error naming the first missing column, before any
/// fitting takes place.
pub fn validate(df: &DataFrame, require_target: bool) -> Result<()> {
    let names: Vec<&str> = df.get_column_names_str();

    for col in feature_columns() {
        if !names.contains(&col) {
            return Err(ScoreprepError::Schema(format!(
                "required column '{col}' is missing from the dataset"
            )));
        }
    }

    if require_target && !names.contains(&TARGET_COLUMN) {
        return Err(ScoreprepError::Schema(format!(
            "target column '{TARGET_COLUMN}' is missing from the dataset"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_df() -> DataFrame {
        df!(
            "writing_score" => &[70.0, 80.0],
            "reading_score" => &[65.0, 75.0],
            "gender" => &["female", "male"],
            "race_ethnicity" => &["group A", "group B"],
            "parental_level_of_education" => &["some college", "high school"],
            "lunch" => &["standard", "free/reduced"],
            "test_preparation_course" => &["none", "completed"],
            "math_score" => &[60.0, 70.0],
        )
        .unwrap()
    }

    #[test]
    fn test_validate_complete_schema() {
        let df = full_df();
        assert!(validate(&df, true).is_ok());
    }

    #[test]
    fn test_validate_missing_feature_column() {
        let df = full_df().drop("lunch").unwrap();
        let err = validate(&df, true).unwrap_err();
        assert!(matches!(err, ScoreprepError::Schema(_)));
        assert!(err.to_string().contains("lunch"));
    }

    #[test]
    fn test_validate_missing_target() {
        let df = full_df().drop("math_score").unwrap();
        assert!(validate(&df, false).is_ok());
        let err = validate(&df, true).unwrap_err();
        assert!(err.to_string().contains("math_score"));
    }
}
