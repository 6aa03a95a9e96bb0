//! The column-routed transformation plan
//!
//! Numeric columns go through median imputation then standard scaling.
//! Categorical columns go through most-frequent imputation, one-hot encoding,
//! then unit-variance scaling without centering. All statistics are learned
//! at fit time and reused unchanged at transform time, so the dataset a plan
//! is applied to never influences how it is transformed.

use crate::error::{Result, ScoreprepError};
use crate::schema::{self, CATEGORICAL_COLUMNS, NUMERIC_COLUMNS};
use super::{
    encoder::{OneHotEncoder, UnseenPolicy},
    imputer::{ImputeStrategy, Imputer},
    scaler::{Scaler, ScalerType},
};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Fitted preprocessing plan over the fixed feature schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preprocessor {
    unseen_policy: UnseenPolicy,
    numeric_imputer: Option<Imputer>,
    numeric_scaler: Option<Scaler>,
    categorical_imputer: Option<Imputer>,
    encoder: Option<OneHotEncoder>,
    indicator_scaler: Option<Scaler>,
    feature_names: Vec<String>,
    is_fitted: bool,
}

impl Preprocessor {
    /// Create a new unfitted plan with the default unseen-category policy
    pub fn new() -> Self {
        Self::with_unseen_policy(UnseenPolicy::default())
    }

    /// Create a new unfitted plan with an explicit unseen-category policy
    pub fn with_unseen_policy(policy: UnseenPolicy) -> Self {
        Self {
            unseen_policy: policy,
            numeric_imputer: None,
            numeric_scaler: None,
            categorical_imputer: None,
            encoder: None,
            indicator_scaler: None,
            feature_names: Vec::new(),
            is_fitted: false,
        }
    }

    /// Fit the plan to a feature DataFrame (no target column expected).
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        schema::validate(df, false)?;
        let df = Self::cast_numeric_to_f64(df)?;

        // Numeric route: impute first, fit the scaler on imputed values
        let mut numeric_imputer = Imputer::new(ImputeStrategy::Median);
        let imputed = numeric_imputer.fit_transform(&df, &NUMERIC_COLUMNS)?;

        let mut numeric_scaler = Scaler::new(ScalerType::Standard);
        numeric_scaler.fit(&imputed, &NUMERIC_COLUMNS)?;

        // Categorical route: impute, build vocabularies, fit the indicator
        // scaler on the encoded training output
        let mut categorical_imputer = Imputer::new(ImputeStrategy::MostFrequent);
        let imputed = categorical_imputer.fit_transform(&imputed, &CATEGORICAL_COLUMNS)?;

        let mut encoder = OneHotEncoder::with_unseen_policy(self.unseen_policy);
        let encoded = encoder.fit_transform(&imputed, &CATEGORICAL_COLUMNS)?;

        let indicator_names: Vec<String> = CATEGORICAL_COLUMNS
            .iter()
            .flat_map(|col| encoder.indicator_names(col).unwrap_or_default())
            .collect();
        let indicator_refs: Vec<&str> = indicator_names.iter().map(|s| s.as_str()).collect();

        let mut indicator_scaler = Scaler::new(ScalerType::UnitVariance);
        indicator_scaler.fit(&encoded, &indicator_refs)?;

        self.feature_names = NUMERIC_COLUMNS
            .iter()
            .map(|s| s.to_string())
            .chain(indicator_names)
            .collect();

        self.numeric_imputer = Some(numeric_imputer);
        self.numeric_scaler = Some(numeric_scaler);
        self.categorical_imputer = Some(categorical_imputer);
        self.encoder = Some(encoder);
        self.indicator_scaler = Some(indicator_scaler);
        self.is_fitted = true;
        Ok(self)
    }

    /// Transform a feature DataFrame with the already-fitted statistics.
    ///
    /// Output column order is the numeric columns in schema order followed by
    /// each categorical column's indicator columns in vocabulary order. Row
    /// count and order match the input exactly.
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(ScoreprepError::NotFitted);
        }
        schema::validate(df, false)?;
        let df = Self::cast_numeric_to_f64(df)?;

        let numeric_imputer = self.numeric_imputer.as_ref().ok_or(ScoreprepError::NotFitted)?;
        let numeric_scaler = self.numeric_scaler.as_ref().ok_or(ScoreprepError::NotFitted)?;
        let categorical_imputer = self
            .categorical_imputer
            .as_ref()
            .ok_or(ScoreprepError::NotFitted)?;
        let encoder = self.encoder.as_ref().ok_or(ScoreprepError::NotFitted)?;
        let indicator_scaler = self
            .indicator_scaler
            .as_ref()
            .ok_or(ScoreprepError::NotFitted)?;

        let result = numeric_imputer.transform(&df)?;
        let result = numeric_scaler.transform(&result)?;
        let result = categorical_imputer.transform(&result)?;
        let result = encoder.transform(&result)?;
        let result = indicator_scaler.transform(&result)?;

        Self::to_matrix(&result, &self.feature_names)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<Array2<f64>> {
        self.fit(df)?;
        self.transform(df)
    }

    /// Output feature column order after fit
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Whether the plan has been fitted
    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    /// Cast the schema's numeric columns to Float64 for consistent processing
    fn cast_numeric_to_f64(df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();
        for col_name in NUMERIC_COLUMNS {
            let casted = result
                .column(col_name)
                .map_err(|_| ScoreprepError::Schema(format!("column '{col_name}' not found")))?
                .cast(&DataType::Float64)
                .map_err(|e| {
                    ScoreprepError::Data(format!("column '{col_name}' is not numeric: {e}"))
                })?;
            result = result.with_column(casted)?.clone();
        }
        Ok(result)
    }

    fn to_matrix(df: &DataFrame, columns: &[String]) -> Result<Array2<f64>> {
        let mut matrix = Array2::<f64>::zeros((df.height(), columns.len()));

        for (j, col_name) in columns.iter().enumerate() {
            let ca = df
                .column(col_name)
                .map_err(|_| {
                    ScoreprepError::Transform(format!("output column '{col_name}' missing"))
                })?
                .f64()
                .map_err(|e| ScoreprepError::Data(e.to_string()))?;

            for (i, val) in ca.into_iter().enumerate() {
                matrix[[i, j]] = val.ok_or_else(|| {
                    ScoreprepError::Transform(format!(
                        "null value survived imputation in column '{col_name}' (row {i})"
                    ))
                })?;
            }
        }

        Ok(matrix)
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
