use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::fragment::Component;
use crate::inventory::Inventory;
use crate::store::Persistence;

pub fn component<S: Persistence>(
    inventory: &mut Inventory<S>,
    component: &Component,
    qty: u64,
) -> Result<CmdResult> {
    inventory.buy_component(component, qty)?;
    let available = inventory.available(component);

    let mut result = CmdResult::default().with_components(vec![(available, component.clone())]);
    result.add_message(CmdMessage::success(format!(
        "Bought {} x {} ({} in stock)",
        qty, component, available
    )));
    Ok(result)
}

pub fn kit<S: Persistence>(inventory: &mut Inventory<S>, name: &str, qty: u64) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if !inventory.buy_kit(name, qty)? {
        result.add_message(CmdMessage::error(format!(
            "Unknown kit: {} (pack it once to define its components)",
            name
        )));
        return Ok(result);
    }

    if let Some(kit) = inventory.kits().kit(name) {
        result.kits = vec![(inventory.kit_available(name), kit)];
    }
    result.add_message(CmdMessage::success(format!(
        "Bought {} x {} ({} in stock)",
        qty,
        name,
        inventory.kit_available(name)
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::{StoreFixture, WIRE};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn buying_a_component_reports_new_stock() {
        let mut inventory = Inventory::open(StoreFixture::new().with_component(5, WIRE).store).unwrap();
        let wire: Component = WIRE.parse().unwrap();

        let result = component(&mut inventory, &wire, 15).unwrap();
        assert_eq!(result.components, vec![(20, wire)]);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(inventory.store().transactions.len(), 1);
    }

    #[test]
    fn buying_an_unknown_kit_is_an_error_message() {
        let mut inventory = Inventory::open(InMemoryStore::new()).unwrap();

        let result = kit(&mut inventory, "Alarm", 2).unwrap();
        assert!(result.failed());
        assert!(result.kits.is_empty());
        assert!(inventory.store().transactions.is_empty());
    }

    #[test]
    fn buying_a_known_kit_adds_to_stock() {
        let store = StoreFixture::new()
            .with_kit(1, "Alarm", &["1:Buzzer,2400.0,85,5.0,30,1.95"])
            .store;
        let mut inventory = Inventory::open(store).unwrap();

        let result = kit(&mut inventory, "Alarm", 2).unwrap();
        assert!(!result.failed());
        assert_eq!(result.kits[0].0, 3);
    }
}
