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
    let mut result = CmdResult::default();
    let on_hand = inventory.available(component);
    if !inventory.sell_component(component, qty)? {
        result.add_message(CmdMessage::error(format!(
            "Cannot sell {} x {}: only {} in stock",
            qty, component, on_hand
        )));
        return Ok(result);
    }

    let remaining = inventory.available(component);
    result.components = vec![(remaining, component.clone())];
    result.add_message(CmdMessage::success(format!(
        "Sold {} x {} ({} left)",
        qty, component, remaining
    )));
    Ok(result)
}

pub fn kit<S: Persistence>(inventory: &mut Inventory<S>, name: &str, qty: u64) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let on_hand = inventory.kit_available(name);
    let kit = inventory.kits().kit(name);
    if !inventory.sell_kit(name, qty)? {
        let reason = if kit.is_none() {
            format!("Unknown kit: {}", name)
        } else {
            format!("Cannot sell {} x {}: only {} in stock", qty, name, on_hand)
        };
        result.add_message(CmdMessage::error(reason));
        return Ok(result);
    }

    let remaining = inventory.kit_available(name);
    if let Some(kit) = kit {
        result.kits = vec![(remaining, kit)];
    }
    result.add_message(CmdMessage::success(format!(
        "Sold {} x {} ({} left)",
        qty, name, remaining
    )));
    Ok(result)
}
