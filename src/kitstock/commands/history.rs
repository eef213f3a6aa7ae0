use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::store::Persistence;

/// Transactions oldest first; with `limit`, only the most recent `limit`.
pub fn run<S: Persistence>(inventory: &Inventory<S>, limit: Option<usize>) -> Result<CmdResult> {
    let history = inventory.history()?;
    let mut records = history.records;
    if let Some(limit) = limit {
        let skip = records.len().saturating_sub(limit);
        records = records.split_off(skip);
    }

    let mut result = CmdResult::default().with_transactions(records);
    if history.skipped > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} transaction rows could not be read and were ignored",
            history.skipped
        )));
    }
    Ok(result)
}
