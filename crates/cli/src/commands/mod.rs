//! Subcommand implementations.

pub mod orders;
pub mod show;

use std::path::PathBuf;
use std::sync::Arc;

use coffee_shop_storefront::config::{ConfigError, StorefrontConfig};
use coffee_shop_storefront::storage::{FileStorage, Storage, StorageError};
use thiserror::Error;

/// Errors that can occur before a command runs.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Environment configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Data directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Open the widget store, preferring an explicit `--data-dir` over the
/// environment.
///
/// # Errors
///
/// Returns an error if the environment is invalid or the directory cannot be
/// created.
pub fn open_storage(data_dir: Option<PathBuf>) -> Result<Arc<dyn Storage>, CommandError> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => StorefrontConfig::from_env()?.data_dir,
    };

    tracing::debug!(data_dir = %data_dir.display(), "Opening widget store");
    Ok(Arc::new(FileStorage::open(data_dir)?))
}
