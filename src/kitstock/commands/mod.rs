//! # Commands
//!
//! One module per user operation. A command takes the [`Inventory`] (or the
//! data directory, for configuration), does its work and returns a
//! [`CmdResult`]: the rows to display plus leveled messages. Commands never
//! print; rendering belongs to the CLI.
//!
//! Outcomes the user can cause by asking for too much (short stock, an
//! unknown kit) come back as `Ok` with an error-level message. `Err` is kept
//! for bad input and I/O failures.
//!
//! [`Inventory`]: crate::inventory::Inventory

use crate::config::KitStockConfig;
use crate::fragment::Component;
use crate::model::Kit;
use crate::transaction::TransactionRecord;
use std::path::PathBuf;

pub mod buy;
pub mod config;
pub mod history;
pub mod list;
pub mod pack;
pub mod paths;
pub mod sell;
pub mod unpack;

#[derive(Debug, Clone)]
pub struct KitStockPaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub components: Vec<(u64, Component)>,
    pub kits: Vec<(u64, Kit)>,
    pub transactions: Vec<TransactionRecord>,
    pub paths: Vec<(String, PathBuf)>,
    pub config: Option<KitStockConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_components(mut self, components: Vec<(u64, Component)>) -> Self {
        self.components = components;
        self
    }

    pub fn with_kits(mut self, kits: Vec<(u64, Kit)>) -> Self {
        self.kits = kits;
        self
    }

    pub fn with_transactions(mut self, transactions: Vec<TransactionRecord>) -> Self {
        self.transactions = transactions;
        self
    }

    pub fn with_paths(mut self, paths: Vec<(String, PathBuf)>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config(mut self, config: KitStockConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// True if any message is error-level.
    pub fn failed(&self) -> bool {
        self.messages
            .iter()
            .any(|message| message.level == MessageLevel::Error)
    }
}
