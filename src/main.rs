use clap::Parser;
use imageset_merge::engine::kv::StoreBackend;
use imageset_merge::engine::merge::{MergeJob, MergeOptions, RasterEncoder};
use imageset_merge::logging;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "imageset_merge")]
#[command(
    about = "Merge an existing image store with a list of new images into a fresh store",
    long_about = None
)]
struct Args {
    /// Store images as single-channel grayscale
    #[arg(long)]
    gray: bool,

    /// Randomly interleave existing and new records
    #[arg(long)]
    shuffle: bool,

    /// Seed for --shuffle, for a reproducible order
    #[arg(long)]
    seed: Option<u64>,

    /// Backend of the existing store
    #[arg(long, value_enum, default_value_t = StoreBackend::Lmdb)]
    existing_backend: StoreBackend,

    /// Backend of the destination store
    #[arg(long, value_enum, default_value_t = StoreBackend::Lmdb)]
    destination_backend: StoreBackend,

    /// Resize height (resizing needs both height and width)
    #[arg(long, default_value = "0")]
    resize_height: u32,

    /// Resize width
    #[arg(long, default_value = "0")]
    resize_width: u32,

    /// Fail when new images differ in size
    #[arg(long)]
    check_size: bool,

    /// Store encoded images instead of raw pixels
    #[arg(long)]
    encoded: bool,

    /// Encoding for new images; implies --encoded
    #[arg(long)]
    encode_type: Option<String>,

    /// Prefix joined to every relative path of the new record list
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// List of entries whose count stands in for the existing store's size
    #[arg(long)]
    existing_count_list: Option<PathBuf>,

    /// `<path> <label>` list of new images
    new_record_list: PathBuf,

    /// Destination store to create
    destination: PathBuf,

    /// Existing store to merge from
    existing_store: PathBuf,
}

impl From<Args> for MergeOptions {
    fn from(args: Args) -> Self {
        MergeOptions {
            grayscale: args.gray,
            shuffle: args.shuffle,
            seed: args.seed,
            existing_backend: args.existing_backend,
            destination_backend: args.destination_backend,
            resize_height: args.resize_height,
            resize_width: args.resize_width,
            check_size: args.check_size,
            encoded: args.encoded,
            encode_type: args.encode_type,
            new_record_list: args.new_record_list,
            destination: args.destination,
            existing_store: args.existing_store,
            existing_count_list: args.existing_count_list,
            root_folder: args.root_folder,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    let options = MergeOptions::from(args);
    let report = match MergeJob::new(options, Box::new(RasterEncoder)).run() {
        Ok(report) => report,
        Err(e) => {
            e.log_error();
            return Err(e.into());
        }
    };

    info!(
        written = report.summary.written,
        skipped = report.summary.skipped,
        "Wrote {} records in {:.3} mins",
        report.summary.written,
        report.total_elapsed.as_secs_f64() / 60.0
    );
    Ok(())
}
