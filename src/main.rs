//! # bufkit
//!
//! This is the main entry point for the **bufkit** storage engine core.
//!
//! The engine is composed of multiple internal components organized under
//! the `/crates` directory of this workspace:
//!
//! - `/storage/page`: Page identity types and raw page buffers.
//! - `/storage/file`: File collaborators performing raw page I/O and page (de)allocation.
//! - `/storage/buffer`: The buffer pool manager caching pages with clock eviction.
//!
//! The binary wires the components together from a TOML configuration and
//! runs a short smoke exercise against the configured files.

use crate::config::EngineConfig;
use crate::engine_environment::EngineEnvironment;
use std::error::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

mod config;
mod engine_environment;

fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "bufkit.toml".to_string());
    let config =
        EngineConfig::load_from_file(&config_path).expect("cannot load engine configuration");

    let logging_guard =
        init_logging(&config.storage.logs_dir.display().to_string()).expect("cannot set up logging");
    tracing::info!(%config_path, "engine configuration loaded");

    let env = EngineEnvironment::new(config);

    if let Err(error) = exercise_pool(&env) {
        tracing::error!(%error, "smoke exercise failed");
    }

    for frame in env.buffer.dump() {
        tracing::info!(?frame, "frame state");
    }

    drop(logging_guard);
}

/// Touches the first configured file through the whole pool surface:
/// allocate, stamp, unpin dirty, flush, re-read.
fn exercise_pool(env: &EngineEnvironment) -> Result<(), Box<dyn Error>> {
    let Some(entry) = env.engine_config.storage.files.first() else {
        tracing::warn!("no files configured; nothing to exercise");
        return Ok(());
    };
    let file_id = entry.id;

    let handle = env.buffer.allocate_page(file_id)?;
    let page_id = handle.page_id();
    tracing::info!(%page_id, "allocated a fresh page");

    env.buffer.page_mut(&handle).data_mut()[..8].copy_from_slice(b"bufkit!!");
    env.buffer.unpin_page(page_id, true)?;
    env.buffer.flush_file(file_id)?;
    tracing::info!(%page_id, "page stamped and flushed to disk");

    let reread = env.buffer.read_page(page_id)?;
    let stamped = env.buffer.page(&reread).data()[..8] == *b"bufkit!!";
    env.buffer.unpin_page(page_id, false)?;
    tracing::info!(%page_id, stamped, "page re-read through the pool");

    Ok(())
}

/// Sets up the logging for the engine
fn init_logging(log_dir: &str) -> Result<WorkerGuard, Box<dyn Error + Send + Sync>> {
    let file_appender = tracing_appender::rolling::daily(log_dir, "bufkit.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_level(true)
        .compact();

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .json()
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
