use super::{History, Persistence, Snapshot};
use crate::error::{KitStockError, Result};
use crate::ledger::{ComponentLedger, KitLedger};
use crate::rows;
use crate::transaction::{TimestampStyle, TransactionRecord};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_COMPONENTS_FILE: &str = "components.csv";
pub const DEFAULT_KITS_FILE: &str = "kits.csv";
pub const DEFAULT_TRANSACTIONS_FILE: &str = "transactions.csv";

/// File names of the three data files, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub components: String,
    pub kits: String,
    pub transactions: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            components: DEFAULT_COMPONENTS_FILE.to_string(),
            kits: DEFAULT_KITS_FILE.to_string(),
            transactions: DEFAULT_TRANSACTIONS_FILE.to_string(),
        }
    }
}

pub struct FileStore {
    root: PathBuf,
    files: DataFiles,
    timestamp_style: TimestampStyle,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            files: DataFiles::default(),
            timestamp_style: TimestampStyle::default(),
        }
    }

    pub fn with_files(mut self, files: DataFiles) -> Self {
        self.files = files;
        self
    }

    pub fn with_timestamp_style(mut self, style: TimestampStyle) -> Self {
        self.timestamp_style = style;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn components_path(&self) -> PathBuf {
        self.root.join(&self.files.components)
    }

    pub fn kits_path(&self) -> PathBuf {
        self.root.join(&self.files.kits)
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.root.join(&self.files.transactions)
    }

    /// Creates the data directory and any missing data file, empty.
    /// Existing files are left untouched.
    pub fn ensure_files(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(KitStockError::Io)?;
        }
        for path in [
            self.components_path(),
            self.kits_path(),
            self.transactions_path(),
        ] {
            if !path.exists() {
                tracing::debug!(path = %path.display(), "creating empty data file");
                fs::write(&path, "").map_err(KitStockError::Io)?;
            }
        }
        Ok(())
    }

    fn read(&self, path: &Path) -> Result<String> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(KitStockError::Io(e)),
        }
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(KitStockError::Io)?;
        }
        let tmp_file = self.root.join(format!(".kitstock-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(KitStockError::Io)?;
        fs::rename(&tmp_file, path).map_err(KitStockError::Io)?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "rewrote data file");
        Ok(())
    }
}

impl Persistence for FileStore {
    fn load(&self) -> Result<Snapshot> {
        let components = self.read(&self.components_path())?;
        let kits = self.read(&self.kits_path())?;
        let snapshot = Snapshot::from_text(
            &self.files.components,
            &components,
            &self.files.kits,
            &kits,
        );
        tracing::debug!(
            root = %self.root.display(),
            components = snapshot.components.len(),
            kits = snapshot.kits.len(),
            skipped = snapshot.report.skipped(),
            "loaded inventory"
        );
        Ok(snapshot)
    }

    fn save_components(&mut self, ledger: &ComponentLedger) -> Result<()> {
        self.write_atomic(&self.components_path(), &rows::render_components(ledger))
    }

    fn save_kits(&mut self, ledger: &KitLedger) -> Result<()> {
        self.write_atomic(&self.kits_path(), &rows::render_kits(ledger))
    }

    fn append_transaction(&mut self, record: &TransactionRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.transactions_path())
            .map_err(KitStockError::Io)?;
        writeln!(file, "{}", record.to_row(self.timestamp_style)).map_err(KitStockError::Io)?;
        Ok(())
    }

    fn load_transactions(&self) -> Result<History> {
        let text = self.read(&self.transactions_path())?;
        Ok(History::from_text(&self.files.transactions, &text))
    }
}
