use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::engine::errors::MergeError;
use crate::engine::kv::{KvStore, OpenMode, open_store};
use crate::shared::config::CONFIG;
use crate::shared::path::absolutize;

use super::ingest::IngestionReader;
use super::merge_writer::{MergeSummary, MergeWriter};
use super::options::MergeOptions;
use super::plan::SequencePlanner;
use super::source_cursor::{SourceCursor, count_records};
use super::transform::{ImageEncoder, RecordTransformer};

#[derive(Debug, Clone)]
pub struct MergeReport {
    pub summary: MergeSummary,
    /// Records the existing store still held after the plan was exhausted.
    pub existing_left_behind: u64,
    pub count_elapsed: Duration,
    pub total_elapsed: Duration,
}

/// End-to-end merge of an existing store and a new record list into a fresh
/// destination store.
pub struct MergeJob {
    options: MergeOptions,
    encoder: Box<dyn ImageEncoder>,
    batch_size: u64,
}

impl MergeJob {
    pub fn new(options: MergeOptions, encoder: Box<dyn ImageEncoder>) -> Self {
        Self {
            options,
            encoder,
            batch_size: CONFIG.merge.batch_size,
        }
    }

    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    fn count_existing(&self, existing_store: &dyn KvStore) -> Result<u64, MergeError> {
        match &self.options.existing_count_list {
            Some(list) => IngestionReader::count(list),
            None => Ok(count_records(existing_store)?),
        }
    }

    pub fn run(self) -> Result<MergeReport, MergeError> {
        let started = Instant::now();
        self.options.validate()?;

        let existing_store = open_store(
            self.options.existing_backend,
            &self.options.existing_store,
            OpenMode::Read,
        )?;

        let count_started = Instant::now();
        let existing_count = self.count_existing(existing_store.as_ref())?;
        if existing_count == 0 {
            return Err(MergeError::InvalidInput(format!(
                "the existing store {:?} holds no records",
                self.options.existing_store
            )));
        }
        let count_elapsed = count_started.elapsed();

        let pending = IngestionReader::read(&self.options.new_record_list)?;
        info!(
            target: "merge_job::run",
            existing = existing_count, new = pending.len(),
            "Adding {} new records", pending.len()
        );

        let plan = SequencePlanner::new(self.options.shuffle)
            .with_seed(self.options.seed)
            .build(existing_count, pending.len() as u64)?;

        let mut output = open_store(
            self.options.destination_backend,
            &self.options.destination,
            OpenMode::New,
        )?;
        info!(
            target: "merge_job::run",
            destination = ?absolutize(&self.options.destination),
            backend = %self.options.destination_backend,
            "Writing destination store"
        );

        let mut cursor = SourceCursor::open(existing_store.as_ref())?;

        let mut transformer =
            RecordTransformer::new(self.encoder, self.options.transform_config());
        let mut writer = MergeWriter::new(self.batch_size);
        let summary = writer.run(
            &plan,
            &mut cursor,
            &pending,
            &mut transformer,
            output.as_mut(),
        )?;

        let existing_left_behind = cursor.drain_remaining()?;
        if existing_left_behind > 0 {
            warn!(
                target: "merge_job::run",
                left = existing_left_behind, counted = existing_count,
                "Existing store holds more records than counted; extra records were not copied"
            );
        }
        output.close()?;

        let total_elapsed = started.elapsed();
        info!(
            target: "merge_job::run",
            written = summary.written, skipped = summary.skipped, commits = summary.commits,
            "Merge finished in {:.3} mins", total_elapsed.as_secs_f64() / 60.0
        );
        info!(
            target: "merge_job::run",
            "Existing record count took {:.3} mins",
            count_elapsed.as_secs_f64() / 60.0
        );

        Ok(MergeReport {
            summary,
            existing_left_behind,
            count_elapsed,
            total_elapsed,
        })
    }
}
