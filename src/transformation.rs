//! End-to-end transformation orchestration
//!
//! Drives the fit/transform/persist flow: load train and test CSVs, split
//! off the target column, fit the preprocessing plan on the training features
//! only, apply the fitted plan to both splits, reattach the target as the
//! trailing matrix column, and persist the fitted plan.

use crate::artifact;
use crate::config::TransformationConfig;
use crate::data;
use crate::error::{Result, ScoreprepError};
use crate::preprocessing::{Preprocessor, UnseenPolicy};
use crate::schema::{self, TARGET_COLUMN};
use ndarray::{Array2, Axis};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Orchestrator for the data transformation flow
#[derive(Debug, Clone, Default)]
pub struct DataTransformation {
    config: TransformationConfig,
    unseen_policy: UnseenPolicy,
}

impl DataTransformation {
    /// Create an orchestrator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an orchestrator with a custom configuration
    pub fn with_config(config: TransformationConfig) -> Self {
        Self {
            config,
            unseen_policy: UnseenPolicy::default(),
        }
    }

    /// Builder method to set the unseen-category policy
    pub fn with_unseen_policy(mut self, policy: UnseenPolicy) -> Self {
        self.unseen_policy = policy;
        self
    }

    /// Run the full fit/transform/persist flow.
    ///
    /// Returns the transformed train and test matrices (target as the final
    /// column, rows in input order) and the artifact path. Any failure is
    /// logged at the orchestrator boundary and propagated; no partial result
    /// is returned.
    pub fn run(
        &self,
        train_path: impl AsRef<Path>,
        test_path: impl AsRef<Path>,
    ) -> Result<(Array2<f64>, Array2<f64>, PathBuf)> {
        self.run_inner(train_path.as_ref(), test_path.as_ref())
            .inspect_err(|e| error!("data transformation failed: {e}"))
    }

    fn run_inner(
        &self,
        train_path: &Path,
        test_path: &Path,
    ) -> Result<(Array2<f64>, Array2<f64>, PathBuf)> {
        info!(
            train = %train_path.display(),
            test = %test_path.display(),
            "starting data transformation"
        );

        let train_df = data::load_csv(train_path)?;
        let test_df = data::load_csv(test_path)?;
        info!(
            train_rows = train_df.height(),
            test_rows = test_df.height(),
            "train and test data read"
        );

        // Schema check up front so a malformed dataset fails before any fitting
        schema::validate(&train_df, true)?;
        schema::validate(&test_df, true)?;

        let (train_features, train_target) = split_target(&train_df)?;
        let (test_features, test_target) = split_target(&test_df)?;

        let mut preprocessor = Preprocessor::with_unseen_policy(self.unseen_policy);
        info!("fitting preprocessor on training features");
        let train_matrix = preprocessor.fit_transform(&train_features)?;
        info!("applying fitted preprocessor to test features");
        let test_matrix = preprocessor.transform(&test_features)?;

        let train_matrix = append_target(train_matrix, &train_target)?;
        let test_matrix = append_target(test_matrix, &test_target)?;

        info!(path = %self.config.artifact_path.display(), "saving preprocessor artifact");
        artifact::save(&self.config.artifact_path, &preprocessor)?;

        info!(
            train_shape = ?train_matrix.dim(),
            test_shape = ?test_matrix.dim(),
            "data transformation completed"
        );
        Ok((train_matrix, test_matrix, self.config.artifact_path.clone()))
    }
}

/// Split a dataset into its feature DataFrame and target values.
fn split_target(df: &DataFrame) -> Result<(DataFrame, Vec<f64>)> {
    let features = df.drop(TARGET_COLUMN)?;

    let target_col = df
        .column(TARGET_COLUMN)
        .map_err(|_| {
            ScoreprepError::Schema(format!("target column '{TARGET_COLUMN}' is missing"))
        })?
        .cast(&DataType::Float64)
        .map_err(|e| {
            ScoreprepError::Data(format!("target column '{TARGET_COLUMN}' is not numeric: {e}"))
        })?;

    let ca = target_col
        .f64()
        .map_err(|e| ScoreprepError::Data(e.to_string()))?;

    let mut target = Vec::with_capacity(ca.len());
    for (i, val) in ca.into_iter().enumerate() {
        target.push(val.ok_or_else(|| {
            ScoreprepError::Data(format!(
                "target column '{TARGET_COLUMN}' has a missing value at row {i}"
            ))
        })?);
    }

    Ok((features, target))
}

/// Append the target values as the trailing column, preserving row order.
fn append_target(features: Array2<f64>, target: &[f64]) -> Result<Array2<f64>> {
    if features.nrows() != target.len() {
        return Err(ScoreprepError::Transform(format!(
            "feature matrix has {} rows but target has {} values",
            features.nrows(),
            target.len()
        )));
    }

    let target_col = Array2::from_shape_vec((target.len(), 1), target.to_vec())
        .map_err(|e| ScoreprepError::Transform(e.to_string()))?;

    ndarray::concatenate(Axis(1), &[features.view(), target_col.view()])
        .map_err(|e| ScoreprepError::Transform(e.to_string()))
}
