use crate::commands::{CmdResult, KitStockPaths};
use crate::config::KitStockConfig;
use crate::error::Result;

/// Where kitstock keeps its data, as `(label, path)` pairs.
pub fn run(paths: &KitStockPaths, config: &KitStockConfig) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    let listed = vec![
        ("data dir".to_string(), dir.clone()),
        ("config".to_string(), dir.join("config.json")),
        ("components".to_string(), dir.join(&config.components_file)),
        ("kits".to_string(), dir.join(&config.kits_file)),
        ("transactions".to_string(), dir.join(&config.transactions_file)),
    ];
    Ok(CmdResult::default().with_paths(listed))
}
