//! # Storage Layer
//!
//! The [`Persistence`] trait is the only way the inventory touches durable
//! state. It is injected into [`Inventory`](crate::inventory::Inventory), so
//! the engine runs identically against files or memory.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production flat files in a data directory
//!   - component and kit files are fully rewritten on every save
//!     (temp file + rename)
//!   - the transaction file is only ever opened for append
//!
//! - [`memory::InMemoryStore`]: the same row format held in strings, for tests
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── components.csv     # qty, kind, fields...
//! ├── kits.csv           # qty, name, item_qty, kind, fields..., ...
//! ├── transactions.csv   # operation, timestamp, qty, payload...
//! └── config.json
//! ```
//!
//! Loading never fails on content; malformed rows are skipped and counted in
//! the returned [`LoadReport`].

use crate::error::Result;
use crate::ledger::{ComponentLedger, KitLedger};
use crate::rows::{self, RowStats};
use crate::transaction::TransactionRecord;

pub mod fs;
pub mod memory;

/// Row counters from a full load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub components: RowStats,
    pub kits: RowStats,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.components.skipped + self.kits.skipped
    }

    pub fn normalized(&self) -> usize {
        self.components.normalized + self.kits.normalized
    }
}

/// Both ledgers as loaded at startup.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub components: ComponentLedger,
    pub kits: KitLedger,
    pub report: LoadReport,
}

impl Snapshot {
    pub fn from_text(
        components_file: &str,
        components: &str,
        kits_file: &str,
        kits: &str,
    ) -> Self {
        let (components, component_stats) = rows::load_components(components_file, components);
        let (kits, kit_stats) = rows::load_kits(kits_file, kits);
        Self {
            components,
            kits,
            report: LoadReport {
                components: component_stats,
                kits: kit_stats,
            },
        }
    }
}

/// Transaction history read back from the log.
#[derive(Debug, Default)]
pub struct History {
    pub records: Vec<TransactionRecord>,
    pub skipped: usize,
}

impl History {
    pub fn from_text(file: &str, text: &str) -> Self {
        let mut history = History::default();
        for (n, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match TransactionRecord::from_row(line) {
                Ok(record) => history.records.push(record),
                Err(e) => {
                    history.skipped += 1;
                    tracing::warn!(file, line = n + 1, error = %e, "skipping malformed transaction row");
                }
            }
        }
        history
    }
}

/// Abstract interface to the persisted ledgers and transaction log.
pub trait Persistence {
    /// Read both ledgers. Missing files load as empty.
    fn load(&self) -> Result<Snapshot>;

    /// Replace the persisted component ledger with `ledger`.
    fn save_components(&mut self, ledger: &ComponentLedger) -> Result<()>;

    /// Replace the persisted kit ledger with `ledger`.
    fn save_kits(&mut self, ledger: &KitLedger) -> Result<()>;

    /// Append one record; earlier records are never touched.
    fn append_transaction(&mut self, record: &TransactionRecord) -> Result<()>;

    /// Read the whole transaction log in file order.
    fn load_transactions(&self) -> Result<History>;
}
