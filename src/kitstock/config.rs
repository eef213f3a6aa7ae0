use crate::error::{KitStockError, Result};
use crate::store::fs::{
    DataFiles, DEFAULT_COMPONENTS_FILE, DEFAULT_KITS_FILE, DEFAULT_TRANSACTIONS_FILE,
};
use crate::transaction::TimestampStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const KEYS: [&str; 4] = [
    "components-file",
    "kits-file",
    "transactions-file",
    "timestamp-padding",
];

/// Configuration for kitstock, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KitStockConfig {
    /// Component stock file name
    #[serde(default = "default_components_file")]
    pub components_file: String,

    /// Kit stock file name
    #[serde(default = "default_kits_file")]
    pub kits_file: String,

    /// Transaction log file name
    #[serde(default = "default_transactions_file")]
    pub transactions_file: String,

    /// Write transaction timestamps with the legacy leading space
    #[serde(default)]
    pub timestamp_padding: bool,
}

fn default_components_file() -> String {
    DEFAULT_COMPONENTS_FILE.to_string()
}

fn default_kits_file() -> String {
    DEFAULT_KITS_FILE.to_string()
}

fn default_transactions_file() -> String {
    DEFAULT_TRANSACTIONS_FILE.to_string()
}

impl Default for KitStockConfig {
    fn default() -> Self {
        Self {
            components_file: default_components_file(),
            kits_file: default_kits_file(),
            transactions_file: default_transactions_file(),
            timestamp_padding: false,
        }
    }
}

impl KitStockConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(KitStockError::Io)?;
        let config: KitStockConfig =
            serde_json::from_str(&content).map_err(KitStockError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(KitStockError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(KitStockError::Serialization)?;
        fs::write(config_path, content).map_err(KitStockError::Io)?;
        Ok(())
    }

    pub fn data_files(&self) -> DataFiles {
        DataFiles {
            components: self.components_file.clone(),
            kits: self.kits_file.clone(),
            transactions: self.transactions_file.clone(),
        }
    }

    pub fn timestamp_style(&self) -> TimestampStyle {
        if self.timestamp_padding {
            TimestampStyle::Padded
        } else {
            TimestampStyle::Plain
        }
    }

    /// Value of a config key as shown to users.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "components-file" => Some(self.components_file.clone()),
            "kits-file" => Some(self.kits_file.clone()),
            "transactions-file" => Some(self.transactions_file.clone()),
            "timestamp-padding" => Some(self.timestamp_padding.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "components-file" => {
                self.components_file = unused_file_name(
                    value,
                    [self.kits_file.as_str(), self.transactions_file.as_str()],
                )?
            }
            "kits-file" => {
                self.kits_file = unused_file_name(
                    value,
                    [self.components_file.as_str(), self.transactions_file.as_str()],
                )?
            }
            "transactions-file" => {
                self.transactions_file = unused_file_name(
                    value,
                    [self.components_file.as_str(), self.kits_file.as_str()],
                )?
            }
            "timestamp-padding" => {
                self.timestamp_padding = value.trim().parse().map_err(|_| {
                    KitStockError::Validation(format!("expected true or false, got {:?}", value))
                })?
            }
            other => {
                return Err(KitStockError::Validation(format!(
                    "unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }
}

/// Data files live directly inside the data directory.
fn file_name(value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty()
        || value.contains('/')
        || value.contains('\\')
        || value == "."
        || value == ".."
    {
        return Err(KitStockError::Validation(format!(
            "expected a plain file name, got {:?}",
            value
        )));
    }
    Ok(value.to_string())
}

/// A valid file name not taken by `others` or by the config file itself.
fn unused_file_name(value: &str, others: [&str; 2]) -> Result<String> {
    let name = file_name(value)?;
    if name == CONFIG_FILENAME || others.contains(&name.as_str()) {
        return Err(KitStockError::Validation(format!(
            "{} is already used by another data file",
            name
        )));
    }
    Ok(name)
}
