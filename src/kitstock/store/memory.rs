use super::{History, Persistence, Snapshot};
use crate::error::{KitStockError, Result};
use crate::ledger::{ComponentLedger, KitLedger};
use crate::rows;
use crate::transaction::{TimestampStyle, TransactionRecord};

/// In-memory storage for testing and development.
/// Holds the same row text the file store would write; does NOT persist.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    pub components: String,
    pub kits: String,
    pub transactions: Vec<String>,
    /// When set, every save fails with an I/O error.
    pub fail_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_components(mut self, text: &str) -> Self {
        self.components = text.to_string();
        self
    }

    pub fn with_kits(mut self, text: &str) -> Self {
        self.kits = text.to_string();
        self
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(KitStockError::Io(std::io::Error::other("store is read-only")));
        }
        Ok(())
    }
}

impl Persistence for InMemoryStore {
    fn load(&self) -> Result<Snapshot> {
        Ok(Snapshot::from_text(
            "components",
            &self.components,
            "kits",
            &self.kits,
        ))
    }

    fn save_components(&mut self, ledger: &ComponentLedger) -> Result<()> {
        self.check_writable()?;
        self.components = rows::render_components(ledger);
        Ok(())
    }

    fn save_kits(&mut self, ledger: &KitLedger) -> Result<()> {
        self.check_writable()?;
        self.kits = rows::render_kits(ledger);
        Ok(())
    }

    fn append_transaction(&mut self, record: &TransactionRecord) -> Result<()> {
        self.check_writable()?;
        self.transactions.push(record.to_row(TimestampStyle::Plain));
        Ok(())
    }

    fn load_transactions(&self) -> Result<History> {
        Ok(History::from_text("transactions", &self.transactions.join("\n")))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub const WIRE: &str = "Wire,100,0.50";
    pub const BATTERY: &str = "Battery,AA,1.5,3.10";
    pub const LED: &str = "LED Light,red,3.0,20,0.50";

    /// Builds store contents row by row.
    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_component(mut self, qty: u64, fragment: &str) -> Self {
            self.store.components.push_str(&format!("{},{}\n", qty, fragment));
            self
        }

        /// `items` are `QTY:FRAGMENT` strings.
        pub fn with_kit(mut self, qty: u64, name: &str, items: &[&str]) -> Self {
            let kit = crate::model::Kit::new(
                name,
                items.iter().map(|item| item.parse().unwrap()).collect(),
            );
            self.store.kits.push_str(&rows::kit_row(qty, &kit));
            self.store.kits.push('\n');
            self
        }

        /// One AA battery and three red LEDs.
        pub fn light_circuit_parts() -> Self {
            Self::new().with_component(1, BATTERY).with_component(3, LED)
        }
    }
}
