//! Stillify CLI - convert live photos and HEIF images to upright JPEGs.
//!
//! # Usage
//!
//! ```bash
//! # Convert a directory with defaults (quality 90, all cores)
//! stillify ./photos ./out
//!
//! # Custom quality and worker count
//! stillify ./photos ./out 85 4
//! ```

use clap::Parser;
use std::path::PathBuf;

mod logging;
mod run;

/// Convert .livp live photos and HEIF/HEIC images to JPEG.
#[derive(Parser, Debug)]
#[command(name = "stillify")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Directory containing .livp / .heif / .heic inputs
    pub input_dir: PathBuf,

    /// Directory for the converted .jpg files (created if missing)
    pub output_dir: PathBuf,

    /// JPEG quality, 1-100
    #[arg(value_name = "QUALITY")]
    pub quality: Option<u8>,

    /// Concurrent workers per batch group (default: available cores)
    #[arg(value_name = "THREADS")]
    pub threads: Option<usize>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    pub json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing positional arguments exit with code 1, not clap's
    // default usage-error code. Help and version still exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Logging isn't initialized yet, so config warnings go to stderr.
    let config = match stillify_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config: {e}\n  Using default configuration.");
            stillify_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("stillify v{}", stillify_core::VERSION);

    run::execute(cli, config).await
}
