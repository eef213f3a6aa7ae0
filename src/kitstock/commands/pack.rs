use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::model::{Kit, KitItem};
use crate::store::Persistence;

/// Packs `count` kits named `name`. With `items`, they become the kit's bill
/// of materials; without, the stored one is reused.
pub fn run<S: Persistence>(
    inventory: &mut Inventory<S>,
    name: &str,
    items: Vec<KitItem>,
    count: u64,
) -> Result<CmdResult> {
    let kit = if items.is_empty() {
        match inventory.kits().kit(name) {
            Some(kit) => kit,
            None => {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(format!(
                    "Unknown kit: {} (give its components with --item)",
                    name
                )));
                return Ok(result);
            }
        }
    } else {
        let kit = Kit::new(name, items);
        kit.validate()?;
        kit
    };

    let mut result = CmdResult::default();
    if !inventory.pack(&kit, count)? {
        result.add_message(CmdMessage::error(format!(
            "Not enough components to pack {} x {}",
            count, name
        )));
        for (short, needed, have) in shortages(inventory, &kit, count) {
            result.add_message(CmdMessage::info(format!(
                "  {}: need {}, have {}",
                short, needed, have
            )));
        }
        return Ok(result);
    }

    result.kits = vec![(inventory.kit_available(name), kit)];
    result.add_message(CmdMessage::success(format!(
        "Packed {} x {} ({} in stock)",
        count,
        name,
        inventory.kit_available(name)
    )));
    Ok(result)
}

fn shortages<S: Persistence>(
    inventory: &Inventory<S>,
    kit: &Kit,
    count: u64,
) -> Vec<(String, u64, u64)> {
    let Some(needs) = kit.requirements(count) else {
        return Vec::new();
    };
    needs
        .into_iter()
        .filter_map(|(component, needed)| {
            let have = inventory.available(component);
            (have < needed).then(|| (component.encode(), needed, have))
        })
        .collect()
}
