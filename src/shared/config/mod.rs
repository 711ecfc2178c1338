pub mod global;
pub mod model;

pub use global::CONFIG;
pub use model::{LoggingConfig, MergeSettings, Settings, StoreSettings, load_settings};
