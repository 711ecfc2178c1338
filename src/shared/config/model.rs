use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub merge: MergeSettings,
    pub store: StoreSettings,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Directory for the rolling log file; stdout only when unset
    pub log_dir: Option<String>,
    pub stdout_level: String,
    pub file_level: String,
}

#[derive(Debug, Deserialize)]
pub struct MergeSettings {
    /// Number of plan positions between two output commits
    pub batch_size: u64,
}

#[derive(Debug, Deserialize)]
pub struct StoreSettings {
    /// Upper bound of an LMDB environment's memory map, in bytes
    pub lmdb_map_size: usize,
}

pub const DEFAULT_BATCH_SIZE: u64 = 1000;
pub const DEFAULT_LMDB_MAP_SIZE: u64 = 1 << 40;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path =
        env::var("IMAGESET_MERGE_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .set_default("logging.stdout_level", "info")?
        .set_default("logging.file_level", "debug")?
        .set_default("merge.batch_size", DEFAULT_BATCH_SIZE as i64)?
        .set_default("store.lmdb_map_size", DEFAULT_LMDB_MAP_SIZE as i64)?
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("IMAGESET_MERGE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
