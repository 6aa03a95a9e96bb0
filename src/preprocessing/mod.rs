//! Data preprocessing module
//!
//! Column-routed preprocessing for the fixed feature schema:
//! - Missing value imputation (median, most-frequent)
//! - One-hot encoding with per-column vocabularies
//! - Feature scaling (standard, unit-variance without centering)

mod encoder;
mod imputer;
mod pipeline;
mod scaler;

pub use encoder::{OneHotEncoder, UnseenPolicy};
pub use imputer::{ImputeStrategy, Imputer};
pub use pipeline::Preprocessor;
pub use scaler::{Scaler, ScalerType};
