use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::store::Persistence;

pub fn run<S: Persistence>(inventory: &mut Inventory<S>, name: &str, count: u64) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(kit) = inventory.kits().kit(name) else {
        result.add_message(CmdMessage::error(format!("Unknown kit: {}", name)));
        return Ok(result);
    };

    let on_hand = inventory.kit_available(name);
    if !inventory.unpack(name, count)? {
        result.add_message(CmdMessage::error(format!(
            "Cannot unpack {} x {}: only {} in stock",
            count, name, on_hand
        )));
        return Ok(result);
    }

    result.components = kit
        .items
        .iter()
        .map(|item| {
            (
                inventory.available(&item.component),
                item.component.clone(),
            )
        })
        .collect();
    result.add_message(CmdMessage::success(format!(
        "Unpacked {} x {} ({} left)",
        count,
        name,
        inventory.kit_available(name)
    )));
    Ok(result)
}
