//! Group-barrier batch scheduling.
//!
//! Items are partitioned into consecutive groups of `workers` items.
//! Each group runs one blocking worker task per item; the group fully
//! joins before the next one starts, and cumulative progress is
//! reported exactly once per group through the caller's callback.
//! Item-level failures are logged and counted, never propagated.

use std::path::Path;

use tokio::task::JoinSet;

use crate::types::{BatchProgress, BatchStats, SourceItem};

use super::convert::Converter;

/// Runs conversions in fixed-size concurrent groups.
pub struct BatchScheduler {
    workers: usize,
    quality: u8,
}

impl BatchScheduler {
    /// Create a scheduler with `workers` concurrent tasks per group.
    ///
    /// A worker count of zero is clamped to one.
    pub fn new(workers: usize, quality: u8) -> Self {
        Self {
            workers: workers.max(1),
            quality,
        }
    }

    /// Convert all `items` into `output_dir`.
    ///
    /// `on_progress` fires after each group joins, with cumulative
    /// completed/total counts; an empty item list fires no progress at
    /// all. Completion order within a group is unspecified; groups are
    /// strictly sequenced.
    pub async fn run<F>(
        &self,
        items: Vec<SourceItem>,
        output_dir: &Path,
        mut on_progress: F,
    ) -> BatchStats
    where
        F: FnMut(BatchProgress),
    {
        let total = items.len();
        let mut stats = BatchStats::default();
        let mut completed = 0usize;

        for group in items.chunks(self.workers) {
            let mut workers = JoinSet::new();
            for item in group {
                let item = item.clone();
                let output_dir = output_dir.to_path_buf();
                let quality = self.quality;
                // Each worker owns its converter and buffers outright
                workers.spawn_blocking(move || {
                    let converter = Converter::new(quality);
                    let result = converter.process_item(&item, &output_dir);
                    (item, result)
                });
            }

            // Group barrier: nothing from the next group starts until
            // every worker here has finished, success or failure.
            while let Some(joined) = workers.join_next().await {
                match joined {
                    Ok((_, Ok(Some(converted)))) => {
                        stats.succeeded += 1;
                        tracing::debug!("Wrote {:?}", converted.output_path);
                    }
                    Ok((item, Ok(None))) => {
                        stats.skipped += 1;
                        tracing::debug!("Skipped {:?} (nothing to convert)", item.path);
                    }
                    Ok((item, Err(e))) => {
                        stats.failed += 1;
                        tracing::error!("Failed: {:?} - {e}", item.path);
                    }
                    Err(e) => {
                        stats.failed += 1;
                        tracing::error!("Worker task failed: {e}");
                    }
                }
            }

            completed += group.len();
            on_progress(BatchProgress { completed, total });
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::classify::{base_name, classify};
    use std::io::Write;
    use std::path::PathBuf;

    fn seed_items(dir: &Path, names: &[&str]) -> Vec<SourceItem> {
        let mut items = Vec::new();
        for name in names {
            let path = dir.join(name);
            std::fs::write(&path, b"junk bitstream").unwrap();
            items.push(SourceItem {
                base_name: base_name(name).to_string(),
                path,
                kind: classify(name),
            });
        }
        items
    }

    #[tokio::test]
    async fn test_five_items_two_workers_three_groups() {
        let dir = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let items = seed_items(dir.path(), &["a.heic", "b.heic", "c.heic", "d.heic", "e.heic"]);

        let mut progress: Vec<(usize, usize, usize)> = Vec::new();
        let scheduler = BatchScheduler::new(2, 90);
        let stats = scheduler
            .run(items, out.path(), |p| {
                progress.push((p.completed, p.total, p.percent()));
            })
            .await;

        assert_eq!(progress, vec![(2, 5, 40), (4, 5, 80), (5, 5, 100)]);
        // Junk payloads all fail to decode but still count as completed
        assert_eq!(stats.failed, 5);
        assert_eq!(stats.succeeded, 0);
    }

    #[tokio::test]
    async fn test_empty_input_emits_no_progress() {
        let out = tempfile::tempdir().unwrap();
        let mut calls = 0;
        let scheduler = BatchScheduler::new(4, 90);
        let stats = scheduler.run(Vec::new(), out.path(), |_| calls += 1).await;

        assert_eq!(calls, 0);
        assert_eq!(stats.succeeded + stats.failed + stats.skipped, 0);
    }

    #[tokio::test]
    async fn test_single_group_when_workers_exceed_items() {
        let dir = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let items = seed_items(dir.path(), &["a.heic", "b.heic", "c.heic"]);

        let mut progress = Vec::new();
        let scheduler = BatchScheduler::new(8, 90);
        scheduler
            .run(items, out.path(), |p| progress.push((p.completed, p.total)))
            .await;

        assert_eq!(progress, vec![(3, 3)]);
    }

    #[tokio::test]
    async fn test_empty_container_counts_as_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();

        let path: PathBuf = dir.path().join("noimage.livp");
        let mut writer = zip::ZipWriter::new(std::fs::File::create(&path).unwrap());
        writer
            .start_file("clip.mov", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"movie").unwrap();
        writer.finish().unwrap();

        let items = vec![SourceItem {
            base_name: "noimage".to_string(),
            path,
            kind: classify("noimage.livp"),
        }];

        let scheduler = BatchScheduler::new(2, 90);
        let stats = scheduler.run(items, out.path(), |_| {}).await;
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.failed, 0);
    }

    #[tokio::test]
    async fn test_zero_workers_clamped() {
        let out = tempfile::tempdir().unwrap();
        let scheduler = BatchScheduler::new(0, 90);
        // Must not panic on chunk size zero
        let stats = scheduler.run(Vec::new(), out.path(), |_| {}).await;
        assert_eq!(stats.failed, 0);
    }
}
