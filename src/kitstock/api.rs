//! # API Facade
//!
//! A thin layer over the command modules and the single entry point for
//! every kitstock operation, whatever the UI.
//!
//! The facade:
//! - **Parses** raw user text: fragments (`Battery,AA,1.5,3.10`) into
//!   [`Component`]s and `QTY:FRAGMENT` strings into [`KitItem`]s
//! - **Dispatches** to the matching command
//! - **Returns** `Result<CmdResult>`, never printing anything
//!
//! `KitStockApi<S: Persistence>` is generic over the store:
//! `KitStockApi<FileStore>` in the binary, `KitStockApi<InMemoryStore>` in
//! tests. Tests here check parsing and dispatch; the stock logic is tested in
//! `inventory.rs` and `commands/`.

use crate::commands;
use crate::config::KitStockConfig;
use crate::error::Result;
use crate::fragment::Component;
use crate::inventory::Inventory;
use crate::model::KitItem;
use crate::store::Persistence;

pub struct KitStockApi<S: Persistence> {
    inventory: Inventory<S>,
    paths: commands::KitStockPaths,
}

impl<S: Persistence> KitStockApi<S> {
    pub fn new(inventory: Inventory<S>, paths: commands::KitStockPaths) -> Self {
        Self { inventory, paths }
    }

    pub fn list_components(&self) -> Result<commands::CmdResult> {
        commands::list::components(&self.inventory)
    }

    pub fn list_kits(&self) -> Result<commands::CmdResult> {
        commands::list::kits(&self.inventory)
    }

    pub fn buy(&mut self, fragment: &str, qty: u64) -> Result<commands::CmdResult> {
        let component: Component = fragment.parse()?;
        commands::buy::component(&mut self.inventory, &component, qty)
    }

    pub fn sell(&mut self, fragment: &str, qty: u64) -> Result<commands::CmdResult> {
        let component: Component = fragment.parse()?;
        commands::sell::component(&mut self.inventory, &component, qty)
    }

    pub fn buy_kit(&mut self, name: &str, qty: u64) -> Result<commands::CmdResult> {
        commands::buy::kit(&mut self.inventory, name.trim(), qty)
    }

    pub fn sell_kit(&mut self, name: &str, qty: u64) -> Result<commands::CmdResult> {
        commands::sell::kit(&mut self.inventory, name.trim(), qty)
    }

    /// `items` are `QTY:FRAGMENT` strings; empty reuses the stored kit.
    pub fn pack<I: AsRef<str>>(
        &mut self,
        name: &str,
        items: &[I],
        count: u64,
    ) -> Result<commands::CmdResult> {
        let items = parse_items(items)?;
        commands::pack::run(&mut self.inventory, name.trim(), items, count)
    }

    pub fn unpack(&mut self, name: &str, count: u64) -> Result<commands::CmdResult> {
        commands::unpack::run(&mut self.inventory, name.trim(), count)
    }

    pub fn history(&self, limit: Option<usize>) -> Result<commands::CmdResult> {
        commands::history::run(&self.inventory, limit)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn data_paths(&self, config: &KitStockConfig) -> Result<commands::CmdResult> {
        commands::paths::run(&self.paths, config)
    }

    pub fn inventory(&self) -> &Inventory<S> {
        &self.inventory
    }

    pub fn paths(&self) -> &commands::KitStockPaths {
        &self.paths
    }
}

fn parse_items<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<KitItem>> {
    inputs
        .iter()
        .map(|s| s.as_ref().parse::<KitItem>().map_err(Into::into))
        .collect()
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, KitStockPaths, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{KitStockError, ParseError};
    use crate::store::memory::fixtures::{StoreFixture, BATTERY, LED};
    use crate::store::memory::InMemoryStore;
    use std::path::PathBuf;

    fn api(store: InMemoryStore) -> KitStockApi<InMemoryStore> {
        KitStockApi::new(
            Inventory::open(store).unwrap(),
            KitStockPaths {
                data_dir: PathBuf::from("/tmp/kitstock-test"),
            },
        )
    }

    #[test]
    fn buy_parses_the_fragment() {
        let mut api = api(InMemoryStore::new());
        let result = api.buy("battery, aa, 1.50, 3.1", 2).unwrap();
        assert_eq!(result.components[0].1.encode(), BATTERY);
        assert_eq!(api.inventory().store().components, format!("2,{}\n", BATTERY));
    }

    #[test]
    fn bad_fragment_is_a_parse_error() {
        let mut api = api(InMemoryStore::new());
        assert!(matches!(
            api.buy("Capacitor,10,0.20", 1),
            Err(KitStockError::Parse(ParseError::UnknownKind(_)))
        ));
        assert!(api.sell("Wire,100", 1).is_err());
    }

    #[test]
    fn fragment_with_line_break_stores_nothing() {
        let mut api = api(InMemoryStore::new());
        assert!(matches!(
            api.buy("Battery,A\nA,1.5,3.10", 5),
            Err(KitStockError::Parse(ParseError::ControlCharacter("size")))
        ));
        assert_eq!(api.inventory().store().components, "");
        assert!(api.inventory().store().transactions.is_empty());
    }

    #[test]
    fn pack_parses_item_strings() {
        let mut api = api(StoreFixture::light_circuit_parts().store);
        let items = [format!("1:{}", BATTERY), format!("2:{}", LED)];

        let result = api.pack("Light Circuit", &items, 1).unwrap();
        assert!(!result.failed());
        assert_eq!(api.inventory().kit_available("Light Circuit"), 1);
    }

    #[test]
    fn pack_rejects_malformed_items() {
        let mut api = api(StoreFixture::light_circuit_parts().store);
        assert!(matches!(
            api.pack("Light Circuit", &["Battery,AA,1.5,3.10"], 1),
            Err(KitStockError::Parse(_))
        ));
    }

    #[test]
    fn kit_names_are_trimmed() {
        let store = StoreFixture::new()
            .with_kit(2, "Alarm", &["1:Switch,push,4.5,1.20"])
            .store;
        let mut api = api(store);
        assert!(!api.sell_kit(" Alarm ", 1).unwrap().failed());
        assert!(!api.unpack("Alarm", 1).unwrap().failed());
        assert!(api.list_kits().unwrap().kits.is_empty());
    }
}
