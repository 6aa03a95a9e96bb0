//! scoreprep - Feature preprocessing for the student performance dataset
//!
//! A minimal supervised-learning scaffold: reads tabular train/test data,
//! builds a column-routed preprocessing plan (imputation, scaling, one-hot
//! encoding), fits it on the training split only, transforms both splits
//! with the target reattached as the trailing column, and persists the
//! fitted plan as a versioned artifact for reuse at inference time.
//!
//! # Modules
//! - [`schema`] - The fixed feature schema and its validation
//! - [`preprocessing`] - Imputers, encoder, scalers, and the [`Preprocessor`] plan
//! - [`transformation`] - The end-to-end fit/transform/persist orchestrator
//! - [`artifact`] - Versioned persistence of fitted plans
//! - [`data`] - CSV loading
//! - [`logging`] - Console + daily-rotating file logging

pub mod artifact;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod preprocessing;
pub mod schema;
pub mod transformation;

pub use config::TransformationConfig;
pub use error::{Result, ScoreprepError};
pub use preprocessing::{Preprocessor, UnseenPolicy};
pub use transformation::DataTransformation;
