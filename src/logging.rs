use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::shared::config::CONFIG;
use tracing::info;

pub fn init() -> anyhow::Result<()> {
    let cfg = &CONFIG.logging;
    let stdout_filter = cfg
        .stdout_level
        .parse::<tracing_subscriber::filter::LevelFilter>()?;
    let stdout_layer = fmt::layer().with_ansi(true).with_filter(stdout_filter);

    let file_layer = match &cfg.log_dir {
        Some(log_dir) => {
            let file_filter = cfg
                .file_level
                .parse::<tracing_subscriber::filter::LevelFilter>()?;
            let file_appender = tracing_appender::rolling::daily(log_dir, "imageset_merge.log");
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(file_appender)
                    .with_filter(file_filter),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();

    info!(log_dir = ?cfg.log_dir, "Logging initialized");
    Ok(())
}

#[cfg(test)]
pub fn init_for_tests() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter =
            EnvFilter::from_default_env().add_directive("imageset_merge=debug".parse().unwrap());

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}
