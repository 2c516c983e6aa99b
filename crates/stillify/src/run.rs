//! Batch run driver: discovery, progress display, and summary.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use stillify_core::{discover, BatchScheduler, BatchStats, Config};

use crate::Cli;

/// Execute a full batch run with the merged CLI/config settings.
pub async fn execute(args: Cli, mut config: Config) -> anyhow::Result<()> {
    if let Some(quality) = args.quality {
        config.conversion.quality = quality;
    }
    if let Some(threads) = args.threads {
        config.conversion.workers = threads;
    }
    config.validate()?;

    if !args.input_dir.is_dir() {
        anyhow::bail!("Input directory does not exist: {:?}", args.input_dir);
    }
    std::fs::create_dir_all(&args.output_dir)?;

    let items = discover(&args.input_dir);
    if items.is_empty() {
        tracing::info!("No .livp or HEIF inputs found in {:?}", args.input_dir);
        return Ok(());
    }
    tracing::info!(
        "Converting {} inputs with {} workers at quality {}",
        items.len(),
        config.conversion.workers,
        config.conversion.quality
    );

    let progress = create_progress_bar(items.len() as u64);
    let start = Instant::now();

    let scheduler = BatchScheduler::new(config.conversion.workers, config.conversion.quality);
    let stats = scheduler
        .run(items, &args.output_dir, |p| {
            progress.set_position(p.completed as u64);
            tracing::debug!("Progress: {}/{} ({}%)", p.completed, p.total, p.percent());
        })
        .await;

    progress.finish_and_clear();
    print_summary(&stats, start.elapsed());

    // Per-item failures were logged and skipped; the run itself
    // succeeded.
    Ok(())
}

/// Create a progress bar sized to the batch.
fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)",
            )
            .unwrap()
            .progress_chars("##-"),
    );
    pb
}

/// Print a formatted summary table after the batch finishes.
fn print_summary(stats: &BatchStats, elapsed: std::time::Duration) {
    let total = stats.succeeded + stats.failed + stats.skipped;
    let rate = if elapsed.as_secs_f64() > 0.0 {
        stats.succeeded as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Converted:    {:>8}", stats.succeeded);
    if stats.failed > 0 {
        eprintln!("    Failed:       {:>8}", stats.failed);
    }
    if stats.skipped > 0 {
        eprintln!("    Skipped:      {:>8}", stats.skipped);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", total);
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");
}
