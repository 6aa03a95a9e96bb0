//! One-hot encoding for categorical columns

use crate::error::{Result, ScoreprepError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What to do with a category observed at transform time but not at fit time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnseenPolicy {
    /// Abort the transform with an error
    Reject,
    /// Encode the value as an all-zero indicator block
    Zero,
}

impl Default for UnseenPolicy {
    fn default() -> Self {
        UnseenPolicy::Reject
    }
}

/// One-hot encoder.
///
/// Each fitted column gets a vocabulary of its distinct observed categories,
/// sorted lexicographically so the indicator column order is deterministic
/// for a given fit dataset. Transforming replaces the source column with one
/// `{column}_{category}` indicator column per vocabulary entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    // Maps column name -> sorted category vocabulary
    vocabularies: HashMap<String, Vec<String>>,
    unseen_policy: UnseenPolicy,
    is_fitted: bool,
}

impl OneHotEncoder {
    /// Create a new encoder with the default unseen-category policy
    pub fn new() -> Self {
        Self::with_unseen_policy(UnseenPolicy::default())
    }

    /// Create a new encoder with an explicit unseen-category policy
    pub fn with_unseen_policy(policy: UnseenPolicy) -> Self {
        Self {
            vocabularies: HashMap::new(),
            unseen_policy: policy,
            is_fitted: false,
        }
    }

    /// Fit the vocabularies to the data
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            let series = df
                .column(col_name)
                .map_err(|_| ScoreprepError::Schema(format!("column '{col_name}' not found")))?
                .as_materialized_series();

            let ca = series
                .str()
                .map_err(|e| ScoreprepError::Data(e.to_string()))?;

            let mut vocab: Vec<String> = Vec::new();
            for val in ca.into_iter().flatten() {
                if !vocab.iter().any(|v| v == val) {
                    vocab.push(val.to_string());
                }
            }
            if vocab.is_empty() {
                return Err(ScoreprepError::Fit(format!(
                    "column '{col_name}' has no observed categories"
                )));
            }
            vocab.sort();

            self.vocabularies.insert(col_name.to_string(), vocab);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data, replacing each fitted column with its indicator columns
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(ScoreprepError::NotFitted);
        }

        let mut result = df.clone();

        for (col_name, vocab) in &self.vocabularies {
            let series = result
                .column(col_name)
                .map_err(|_| ScoreprepError::Schema(format!("column '{col_name}' not found")))?
                .as_materialized_series()
                .clone();

            let ca = series
                .str()
                .map_err(|e| ScoreprepError::Data(e.to_string()))?;

            if self.unseen_policy == UnseenPolicy::Reject {
                for val in ca.into_iter().flatten() {
                    if !vocab.iter().any(|v| v == val) {
                        return Err(ScoreprepError::Transform(format!(
                            "unseen category '{val}' in column '{col_name}'"
                        )));
                    }
                }
            }

            for category in vocab {
                let values: Vec<f64> = ca
                    .into_iter()
                    .map(|v| if v == Some(category.as_str()) { 1.0 } else { 0.0 })
                    .collect();

                let indicator = Series::new(Self::indicator_name(col_name, category).into(), values);
                result = result.with_column(indicator)?.clone();
            }

            result = result.drop(col_name)?;
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Indicator column names produced for `col_name`, in vocabulary order
    pub fn indicator_names(&self, col_name: &str) -> Option<Vec<String>> {
        self.vocabularies.get(col_name).map(|vocab| {
            vocab
                .iter()
                .map(|category| Self::indicator_name(col_name, category))
                .collect()
        })
    }

    /// Fitted vocabulary for `col_name`
    pub fn vocabulary(&self, col_name: &str) -> Option<&[String]> {
        self.vocabularies.get(col_name).map(|v| v.as_slice())
    }

    fn indicator_name(col_name: &str, category: &str) -> String {
        format!("{col_name}_{category}")
    }
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        DataFrame::new(vec![Column::new(
            "lunch".into(),
            &["standard", "free/reduced", "standard"],
        )])
        .unwrap()
    }

    #[test]
    fn test_onehot_encoding() {
        let df = sample_df();
        let mut encoder = OneHotEncoder::new();
        let result = encoder.fit_transform(&df, &["lunch"]).unwrap();

        // Source column dropped, one indicator per category
        assert!(result.column("lunch").is_err());
        assert_eq!(result.width(), 2);

        let standard = result.column("lunch_standard").unwrap().f64().unwrap();
        assert_eq!(standard.get(0).unwrap(), 1.0);
        assert_eq!(standard.get(1).unwrap(), 0.0);
        assert_eq!(standard.get(2).unwrap(), 1.0);
    }

    #[test]
    fn test_vocabulary_sorted() {
        let df = sample_df();
        let mut encoder = OneHotEncoder::new();
        encoder.fit(&df, &["lunch"]).unwrap();

        assert_eq!(
            encoder.vocabulary("lunch").unwrap(),
            &["free/reduced".to_string(), "standard".to_string()]
        );
    }

    #[test]
    fn test_unseen_category_rejected() {
        let mut encoder = OneHotEncoder::new();
        encoder.fit(&sample_df(), &["lunch"]).unwrap();

        let test_df =
            DataFrame::new(vec![Column::new("lunch".into(), &["standard", "premium"])]).unwrap();
        let err = encoder.transform(&test_df).unwrap_err();
        assert!(matches!(err, ScoreprepError::Transform(_)));
        assert!(err.to_string().contains("premium"));
    }

    #[test]
    fn test_unseen_category_zero_policy() {
        let mut encoder = OneHotEncoder::with_unseen_policy(UnseenPolicy::Zero);
        encoder.fit(&sample_df(), &["lunch"]).unwrap();

        let test_df =
            DataFrame::new(vec![Column::new("lunch".into(), &["standard", "premium"])]).unwrap();
        let result = encoder.transform(&test_df).unwrap();

        let standard = result.column("lunch_standard").unwrap().f64().unwrap();
        let reduced = result.column("lunch_free/reduced").unwrap().f64().unwrap();
        assert_eq!(standard.get(1).unwrap(), 0.0);
        assert_eq!(reduced.get(1).unwrap(), 0.0);
    }
}
