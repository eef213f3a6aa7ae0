use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::rows::RowStats;
use crate::store::Persistence;

fn load_warning(result: &mut CmdResult, what: &str, stats: RowStats) {
    if stats.skipped > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} of {} {} rows could not be read and were ignored",
            stats.skipped, stats.read, what
        )));
    }
}

pub fn components<S: Persistence>(inventory: &Inventory<S>) -> Result<CmdResult> {
    let mut result = CmdResult::default().with_components(inventory.components().list_all());
    load_warning(&mut result, "component", inventory.load_report().components);
    Ok(result)
}

pub fn kits<S: Persistence>(inventory: &Inventory<S>) -> Result<CmdResult> {
    let mut result = CmdResult::default().with_kits(inventory.kits().list_all());
    load_warning(&mut result, "kit", inventory.load_report().kits);
    Ok(result)
}
