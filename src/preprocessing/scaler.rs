//! Feature scaling

use crate::error::{Result, ScoreprepError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type of scaler to use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalerType {
    /// Standard scaling (z-score): (x - mean) / std
    Standard,
    /// Unit-variance scaling without centering: x / std.
    /// Used for one-hot output, which is sparse and non-negative.
    UnitVariance,
}

/// Parameters for a fitted scaler column
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScalerParams {
    center: f64,
    scale: f64,
}

/// Feature scaler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    scaler_type: ScalerType,
    params: HashMap<String, ScalerParams>,
    is_fitted: bool,
}

impl Scaler {
    /// Create a new scaler
    pub fn new(scaler_type: ScalerType) -> Self {
        Self {
            scaler_type,
            params: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Fit the scaler to the data
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            let series = df
                .column(col_name)
                .map_err(|_| ScoreprepError::Schema(format!("column '{col_name}' not found")))?
                .as_materialized_series();

            let params = self.compute_params(series, col_name)?;
            self.params.insert(col_name.to_string(), params);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data.
    /// Builds all replacement columns first, then applies them in one pass.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(ScoreprepError::NotFitted);
        }

        let replacements: Vec<Series> = self
            .params
            .iter()
            .map(|(col_name, params)| {
                let column = df.column(col_name).map_err(|_| {
                    ScoreprepError::Transform(format!("column '{col_name}' not found"))
                })?;
                Self::scale_series(column.as_materialized_series(), params)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut result = df.clone();
        for scaled in replacements {
            result = result.with_column(scaled)?.clone();
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    fn compute_params(&self, series: &Series, col_name: &str) -> Result<ScalerParams> {
        let ca = series
            .f64()
            .map_err(|e| ScoreprepError::Data(e.to_string()))?;

        // A single sample leaves std(ddof=1) undefined; treat it like a
        // constant column and fall back to pass-through scaling
        let std = ca.std(1).unwrap_or(0.0);
        let scale = if std == 0.0 { 1.0 } else { std };

        let center = match self.scaler_type {
            ScalerType::Standard => ca.mean().ok_or_else(|| {
                ScoreprepError::Fit(format!("mean of column '{col_name}' is undefined"))
            })?,
            ScalerType::UnitVariance => 0.0,
        };

        Ok(ScalerParams { center, scale })
    }

    fn scale_series(series: &Series, params: &ScalerParams) -> Result<Series> {
        let ca = series
            .f64()
            .map_err(|e| ScoreprepError::Data(e.to_string()))?;

        let scaled: Float64Chunked = ca
            .into_iter()
            .map(|opt| opt.map(|v| (v - params.center) / params.scale))
            .collect();

        Ok(scaled.with_name(series.name().clone()).into_series())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_scaler() {
        let df = DataFrame::new(vec![Column::new(
            "a".into(),
            &[1.0, 2.0, 3.0, 4.0, 5.0],
        )])
        .unwrap();

        let mut scaler = Scaler::new(ScalerType::Standard);
        let result = scaler.fit_transform(&df, &["a"]).unwrap();

        let col = result.column("a").unwrap().f64().unwrap();
        let mean: f64 = col.mean().unwrap();
        assert!(mean.abs() < 1e-10);
    }

    #[test]
    fn test_unit_variance_scaler_keeps_zeros() {
        let df = DataFrame::new(vec![Column::new(
            "a".into(),
            &[0.0, 0.0, 1.0, 1.0],
        )])
        .unwrap();

        let mut scaler = Scaler::new(ScalerType::UnitVariance);
        let result = scaler.fit_transform(&df, &["a"]).unwrap();

        // No centering: zeros stay zero, ones are divided by std
        let col = result.column("a").unwrap().f64().unwrap();
        assert_eq!(col.get(0).unwrap(), 0.0);
        assert!(col.get(2).unwrap() > 0.0);
    }

    #[test]
    fn test_constant_column_scale_falls_back() {
        let df = DataFrame::new(vec![Column::new("a".into(), &[2.0, 2.0, 2.0])]).unwrap();

        let mut scaler = Scaler::new(ScalerType::UnitVariance);
        let result = scaler.fit_transform(&df, &["a"]).unwrap();

        // std == 0 falls back to scale 1.0, values pass through
        let col = result.column("a").unwrap().f64().unwrap();
        assert_eq!(col.get(0).unwrap(), 2.0);
    }

    #[test]
    fn test_single_row_falls_back_to_passthrough() {
        let df = DataFrame::new(vec![Column::new("a".into(), &[70.0])]).unwrap();

        let mut scaler = Scaler::new(ScalerType::Standard);
        let result = scaler.fit_transform(&df, &["a"]).unwrap();

        // One sample: std is undefined, scale falls back to 1.0 and the
        // centered value is exactly zero
        let col = result.column("a").unwrap().f64().unwrap();
        assert_eq!(col.get(0).unwrap(), 0.0);
    }

    #[test]
    fn test_transform_before_fit() {
        let df = DataFrame::new(vec![Column::new("a".into(), &[1.0])]).unwrap();
        let scaler = Scaler::new(ScalerType::Standard);
        assert!(matches!(
            scaler.transform(&df).unwrap_err(),
            ScoreprepError::NotFitted
        ));
    }
}
