//! scoreprep - Command-line driver
//!
//! Thin wrapper around the transformation orchestrator: parse arguments,
//! initialize logging, run the flow, report the resulting shapes.

use clap::Parser;
use scoreprep::{DataTransformation, TransformationConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scoreprep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Feature preprocessing pipeline for the student performance dataset")]
struct Cli {
    /// Training data CSV
    #[arg(long)]
    train: PathBuf,

    /// Test data CSV
    #[arg(long)]
    test: PathBuf,

    /// Where to write the fitted preprocessor artifact
    #[arg(long, default_value = "artifacts/preprocessor.json")]
    artifact: PathBuf,

    /// Directory for daily-rotating log files
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> scoreprep::Result<()> {
    let cli = Cli::parse();
    let _guard = scoreprep::logging::init(&cli.log_dir);

    let config = TransformationConfig::new().with_artifact_path(&cli.artifact);
    let (train_matrix, test_matrix, artifact_path) =
        DataTransformation::with_config(config).run(&cli.train, &cli.test)?;

    println!(
        "train matrix: {} x {}",
        train_matrix.nrows(),
        train_matrix.ncols()
    );
    println!(
        "test matrix:  {} x {}",
        test_matrix.nrows(),
        test_matrix.ncols()
    );
    println!("artifact:     {}", artifact_path.display());

    Ok(())
}
