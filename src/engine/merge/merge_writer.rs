use tracing::{debug, info};

use crate::engine::errors::MergeError;
use crate::engine::kv::KvStore;

use super::ingest::PendingRecord;
use super::key_allocator::{allocate_key, rekey_existing};
use super::plan::{Origin, Plan};
use super::source_cursor::SourceCursor;
use super::transform::RecordTransformer;

/// Running indices of a merge, advanced slot by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeState {
    /// Plan position currently being written.
    pub position: u64,
    /// Next unconsumed entry of the pending list.
    pub pending_index: usize,
    /// Puts staged in the open transaction.
    pub staged: u64,
    pub commits: u64,
    /// Records durably committed.
    pub written: u64,
    pub existing_copied: u64,
    pub new_added: u64,
    pub skipped: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub plan_len: u64,
    pub written: u64,
    pub existing_copied: u64,
    pub new_added: u64,
    pub skipped: u64,
    pub commits: u64,
}

impl From<(&Plan, &MergeState)> for MergeSummary {
    fn from((plan, state): (&Plan, &MergeState)) -> Self {
        Self {
            plan_len: plan.len() as u64,
            written: state.written,
            existing_copied: state.existing_copied,
            new_added: state.new_added,
            skipped: state.skipped,
            commits: state.commits,
        }
    }
}

/// Walks a plan and writes one output record per slot, committing every
/// `batch_size` positions.
///
/// Commits happen after writing each position divisible by `batch_size`
/// (position 0 included), then once more for whatever is still staged when the
/// plan ends.
pub struct MergeWriter {
    batch_size: u64,
    state: MergeState,
}

impl MergeWriter {
    pub fn new(batch_size: u64) -> Self {
        Self {
            batch_size: batch_size.max(1),
            state: MergeState::default(),
        }
    }

    pub fn state(&self) -> &MergeState {
        &self.state
    }

    pub fn run(
        &mut self,
        plan: &Plan,
        existing: &mut SourceCursor<'_>,
        pending: &[PendingRecord],
        transformer: &mut RecordTransformer,
        output: &mut dyn KvStore,
    ) -> Result<MergeSummary, MergeError> {
        let mut txn = output.new_transaction();

        for slot in plan.iter() {
            self.state.position = slot.position;

            match slot.origin {
                Origin::New => {
                    let record = pending.get(self.state.pending_index).ok_or_else(|| {
                        MergeError::InvalidInput(format!(
                            "plan expects more than {} new records",
                            pending.len()
                        ))
                    })?;
                    self.state.pending_index += 1;

                    match transformer.transform(record)? {
                        Some(payload) => {
                            let key = allocate_key(slot.position, &record.path);
                            txn.put(key.as_bytes(), &payload);
                            self.state.staged += 1;
                            self.state.new_added += 1;
                        }
                        None => self.state.skipped += 1,
                    }
                }
                Origin::Existing => {
                    let record = existing.next_record()?.ok_or(MergeError::PlanCursorMismatch {
                        position: slot.position,
                        expected: plan.existing_count(),
                        found: existing.consumed(),
                    })?;
                    let key = rekey_existing(slot.position, &record.key);
                    txn.put(&key, &record.value);
                    self.state.staged += 1;
                    self.state.existing_copied += 1;
                }
            }

            if slot.position % self.batch_size == 0 {
                txn.commit()?;
                self.record_commit();
                info!(
                    target: "merge_writer::run",
                    position = slot.position, written = self.state.written,
                    "Processed {} files", slot.position
                );
                txn = output.new_transaction();
            }
        }

        if txn.is_empty() {
            drop(txn);
        } else {
            txn.commit()?;
            self.record_commit();
            info!(
                target: "merge_writer::run",
                written = self.state.written, plan_len = plan.len(),
                "Write {} files", self.state.written
            );
        }

        Ok(MergeSummary::from((plan, &self.state)))
    }

    fn record_commit(&mut self) {
        self.state.commits += 1;
        self.state.written += self.state.staged;
        debug!(
            target: "merge_writer::record_commit",
            staged = self.state.staged, commits = self.state.commits,
            "Committed batch"
        );
        self.state.staged = 0;
    }
}
