pub mod datum;
pub mod ingest;
pub mod key_allocator;
pub mod merge_job;
pub mod merge_writer;
pub mod options;
pub mod plan;
pub mod raster;
pub mod source_cursor;
pub mod transform;

pub use datum::Datum;
pub use ingest::{IngestionReader, PendingRecord};
pub use merge_job::{MergeJob, MergeReport};
pub use merge_writer::{MergeState, MergeSummary, MergeWriter};
pub use options::MergeOptions;
pub use plan::{Origin, Plan, PlanSlot, SequencePlanner};
pub use raster::RasterEncoder;
pub use source_cursor::{ExistingRecord, SourceCursor, count_records};
pub use transform::{EncodeOptions, ImageEncoder, RecordTransformer, TransformConfig};

#[cfg(test)]
mod plan_test;
