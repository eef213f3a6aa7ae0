use crate::api::{KitStockApi, KitStockPaths};
use crate::config::KitStockConfig;
use crate::error::{KitStockError, Result};
use crate::inventory::Inventory;
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "KITSTOCK_HOME";

pub struct KitStockContext {
    pub api: KitStockApi<FileStore>,
    pub config: KitStockConfig,
}

/// Picks the data directory: an explicit override, then `$KITSTOCK_HOME`,
/// then the platform data directory.
pub fn resolve_data_dir(override_dir: Option<&Path>, env_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        return Ok(dir);
    }
    ProjectDirs::from("com", "kitstock", "kitstock")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| KitStockError::Store("Could not determine a data directory".to_string()))
}

/// Loads config and both ledgers from `data_dir`, creating empty data files
/// on first use.
pub fn initialize(data_dir: PathBuf) -> Result<KitStockContext> {
    let config = KitStockConfig::load(&data_dir)?;

    let store = FileStore::new(data_dir.clone())
        .with_files(config.data_files())
        .with_timestamp_style(config.timestamp_style());
    store.ensure_files()?;
    tracing::debug!(data_dir = %data_dir.display(), "opening inventory");

    let inventory = Inventory::open(store)?;
    let api = KitStockApi::new(inventory, KitStockPaths { data_dir });

    Ok(KitStockContext { api, config })
}
