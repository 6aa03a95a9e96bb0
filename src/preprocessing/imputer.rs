//! Missing value imputation

use crate::error::{Result, ScoreprepError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Strategy for imputing missing values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Replace with the per-column median (numeric only)
    Median,
    /// Replace with the per-column most frequent value (categorical)
    MostFrequent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum ImputeValue {
    Numeric(f64),
    Category(String),
}

/// Imputer for handling missing values.
///
/// Fill values are learned at fit time from the training data only and
/// reused unchanged at transform time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Imputer {
    strategy: ImputeStrategy,
    fill_values: HashMap<String, ImputeValue>,
    is_fitted: bool,
}

impl Imputer {
    /// Create a new imputer with the specified strategy
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            fill_values: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Fit the imputer to the data.
    ///
    /// A column whose values are all missing leaves the median/mode
    /// undefined and aborts the fit.
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            let series = df
                .column(col_name)
                .map_err(|_| ScoreprepError::Schema(format!("column '{col_name}' not found")))?
                .as_materialized_series();

            let fill_value = match self.strategy {
                ImputeStrategy::Median => {
                    let median = series
                        .f64()
                        .map_err(|e| ScoreprepError::Data(e.to_string()))?
                        .median()
                        .ok_or_else(|| {
                            ScoreprepError::Fit(format!(
                                "median of column '{col_name}' is undefined (no non-missing values)"
                            ))
                        })?;
                    ImputeValue::Numeric(median)
                }
                ImputeStrategy::MostFrequent => {
                    let mode = Self::compute_mode(series)?.ok_or_else(|| {
                        ScoreprepError::Fit(format!(
                            "mode of column '{col_name}' is undefined (no non-missing values)"
                        ))
                    })?;
                    ImputeValue::Category(mode)
                }
            };

            self.fill_values.insert(col_name.to_string(), fill_value);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data by filling missing values with the fitted statistics
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(ScoreprepError::NotFitted);
        }

        let mut result = df.clone();

        for (col_name, fill_value) in &self.fill_values {
            let series = result
                .column(col_name)
                .map_err(|_| ScoreprepError::Schema(format!("column '{col_name}' not found")))?
                .as_materialized_series()
                .clone();

            let filled = Self::fill_series(&series, fill_value)?;
            result = result.with_column(filled)?.clone();
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Most frequent non-missing string value; ties resolved by the smaller
    /// category so the result does not depend on hash order.
    fn compute_mode(series: &Series) -> Result<Option<String>> {
        let ca = series
            .str()
            .map_err(|e| ScoreprepError::Data(e.to_string()))?;

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for val in ca.into_iter().flatten() {
            *counts.entry(val).or_insert(0) += 1;
        }

        Ok(counts
            .into_iter()
            .max_by(|(a_val, a_n), (b_val, b_n)| a_n.cmp(b_n).then(b_val.cmp(a_val)))
            .map(|(val, _)| val.to_string()))
    }

    fn fill_series(series: &Series, fill_value: &ImputeValue) -> Result<Series> {
        match fill_value {
            ImputeValue::Numeric(val) => {
                let ca = series
                    .f64()
                    .map_err(|e| ScoreprepError::Data(e.to_string()))?;

                let filled: Float64Chunked = ca
                    .into_iter()
                    .map(|opt| Some(opt.unwrap_or(*val)))
                    .collect();

                Ok(filled.with_name(series.name().clone()).into_series())
            }
            ImputeValue::Category(val) => {
                let ca = series
                    .str()
                    .map_err(|e| ScoreprepError::Data(e.to_string()))?;

                let filled: StringChunked = ca
                    .into_iter()
                    .map(|opt| Some(opt.unwrap_or(val.as_str()).to_string()))
                    .collect();

                Ok(filled.with_name(series.name().clone()).into_series())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_imputation() {
        let df = DataFrame::new(vec![Column::new(
            "score".into(),
            &[Some(70.0), Some(80.0), None, Some(90.0)],
        )])
        .unwrap();

        let mut imputer = Imputer::new(ImputeStrategy::Median);
        let result = imputer.fit_transform(&df, &["score"]).unwrap();

        let col = result.column("score").unwrap().f64().unwrap();
        // Median of [70, 80, 90] = 80
        assert_eq!(col.get(2).unwrap(), 80.0);
        assert_eq!(col.null_count(), 0);
    }

    #[test]
    fn test_most_frequent_imputation() {
        let df = DataFrame::new(vec![Column::new(
            "lunch".into(),
            &[Some("standard"), Some("standard"), None, Some("free/reduced")],
        )])
        .unwrap();

        let mut imputer = Imputer::new(ImputeStrategy::MostFrequent);
        let result = imputer.fit_transform(&df, &["lunch"]).unwrap();

        let col = result.column("lunch").unwrap().str().unwrap();
        assert_eq!(col.get(2).unwrap(), "standard");
    }

    #[test]
    fn test_all_missing_column_fails_fit() {
        let df = DataFrame::new(vec![Column::new(
            "score".into(),
            &[None::<f64>, None, None],
        )])
        .unwrap();

        let mut imputer = Imputer::new(ImputeStrategy::Median);
        let err = imputer.fit(&df, &["score"]).unwrap_err();
        assert!(matches!(err, ScoreprepError::Fit(_)));
    }

    #[test]
    fn test_transform_before_fit() {
        let df = DataFrame::new(vec![Column::new("score".into(), &[1.0, 2.0])]).unwrap();
        let imputer = Imputer::new(ImputeStrategy::Median);
        assert!(matches!(
            imputer.transform(&df).unwrap_err(),
            ScoreprepError::NotFitted
        ));
    }
}
