//! Versioned persistence of fitted preprocessors
//!
//! The artifact is a JSON envelope `{ version, preprocessor }` holding every
//! learned parameter (medians, modes, vocabularies, scale factors). Writes go
//! to a sibling temp file first and are renamed into place, so the artifact
//! under its final name is either fully written or absent/stale.

use crate::error::{Result, ScoreprepError};
use crate::preprocessing::Preprocessor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current artifact format version
pub const ARTIFACT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct ArtifactEnvelope {
    version: u32,
    preprocessor: Preprocessor,
}

/// Save a fitted preprocessor to `path`, creating parent directories as
/// needed and overwriting any existing artifact.
pub fn save(path: impl AsRef<Path>, preprocessor: &Preprocessor) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let envelope = ArtifactEnvelope {
        version: ARTIFACT_VERSION,
        preprocessor: preprocessor.clone(),
    };
    let json = serde_json::to_string_pretty(&envelope)?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Load a fitted preprocessor from `path`, checking the envelope version.
pub fn load(path: impl AsRef<Path>) -> Result<Preprocessor> {
    let json = fs::read_to_string(path.as_ref())?;
    let envelope: ArtifactEnvelope = serde_json::from_str(&json)?;

    if envelope.version != ARTIFACT_VERSION {
        return Err(ScoreprepError::UnsupportedArtifactVersion(envelope.version));
    }

    Ok(envelope.preprocessor)
}
