//! # Row Codec
//!
//! The three data files are plain delimited text: one record per line,
//! comma-separated, every field trimmed on read.
//!
//! ```text
//! components:   qty, kind, fields...
//! kits:         qty, kit name, item_qty, kind, fields..., item_qty, kind, fields...
//! transactions: operation, timestamp, qty, payload...
//! ```
//!
//! Bulk loaders never fail on content: a malformed row is logged, counted in
//! [`RowStats::skipped`] and dropped, and loading carries on.

use crate::error::ParseError;
use crate::fragment::{Component, ComponentKind};
use crate::ledger::{ComponentLedger, KitLedger};
use crate::model::{Kit, KitItem};

/// Counters from loading one file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RowStats {
    /// Non-blank rows seen.
    pub read: usize,
    /// Rows dropped as malformed.
    pub skipped: usize,
    /// Rows whose fragment or item text differed from its canonical encoding.
    pub normalized: usize,
}

pub fn split_row(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

pub fn join_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|field| field.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

/// Leading stock quantity; missing or malformed counts as zero.
fn quantity(field: Option<&&str>) -> u64 {
    field.and_then(|f| f.parse().ok()).unwrap_or(0)
}

pub fn component_row(qty: u64, component: &Component) -> String {
    format!("{},{}", qty, component)
}

/// Returns the quantity, the component, and whether the stored text was
/// already canonical.
pub fn parse_component_row(line: &str) -> Result<(u64, Component, bool), ParseError> {
    let fields = split_row(line);
    if fields.len() < 2 {
        return Err(ParseError::Row(line.to_string()));
    }
    let raw = join_row(&fields[1..]);
    let component = Component::decode(&raw)?;
    let canonical = component.encode() == raw;
    Ok((quantity(fields.first()), component, canonical))
}

/// Decodes a flattened `item_qty, kind, fields...` repeating group. Any
/// group with a bad quantity, an unknown kind or too few fields rejects the
/// whole sequence.
pub fn parse_items(tokens: &[&str]) -> Result<Vec<KitItem>, ParseError> {
    let mut items = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let item_qty: u64 = tokens[i].parse().map_err(|_| ParseError::InvalidNumber {
            field: "item quantity",
            value: tokens[i].to_string(),
        })?;
        if item_qty == 0 {
            return Err(ParseError::InvalidNumber {
                field: "item quantity",
                value: tokens[i].to_string(),
            });
        }
        let kind: ComponentKind = tokens
            .get(i + 1)
            .ok_or_else(|| ParseError::Row("item quantity without a kind".into()))?
            .parse()?;
        let start = i + 2;
        let end = start + kind.arity() - 1;
        if end > tokens.len() {
            return Err(ParseError::FieldCount {
                kind: kind.label(),
                expected: kind.arity(),
                found: tokens.len() - start + 1,
            });
        }
        let component = Component::from_fields(kind, &tokens[start..end])?;
        items.push(KitItem::new(item_qty, component));
        i = end;
    }
    Ok(items)
}

pub fn kit_row(qty: u64, kit: &Kit) -> String {
    let mut fields = vec![qty.to_string(), kit.name.clone()];
    fields.extend(kit.flat_items());
    join_row(&fields)
}

pub fn parse_kit_row(line: &str) -> Result<(u64, Kit), ParseError> {
    let fields = split_row(line);
    if fields.len() < 2 || fields[1].is_empty() {
        return Err(ParseError::Row(line.to_string()));
    }
    let items = parse_items(&fields[2..])?;
    Ok((quantity(fields.first()), Kit::new(fields[1], items)))
}

/// True when the row's item fields already match their canonical encoding.
fn items_canonical(line: &str, kit: &Kit) -> bool {
    let fields = split_row(line);
    join_row(&fields[2..]) == join_row(&kit.flat_items())
}

fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(n, line)| (n + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

/// Builds a component ledger from file text. Duplicate fragments are summed.
pub fn load_components(file: &str, text: &str) -> (ComponentLedger, RowStats) {
    let mut ledger = ComponentLedger::new();
    let mut stats = RowStats::default();
    for (line_no, line) in data_lines(text) {
        stats.read += 1;
        match parse_component_row(line) {
            Ok((qty, component, canonical)) => {
                if !canonical {
                    stats.normalized += 1;
                    tracing::debug!(file, line = line_no, fragment = %component, "normalized fragment");
                }
                ledger.credit(&component, qty);
            }
            Err(e) => {
                stats.skipped += 1;
                tracing::warn!(file, line = line_no, error = %e, "skipping malformed component row");
            }
        }
    }
    (ledger, stats)
}

/// Builds a kit ledger from file text. Duplicate names sum quantities and the
/// later row's items win.
pub fn load_kits(file: &str, text: &str) -> (KitLedger, RowStats) {
    let mut ledger = KitLedger::new();
    let mut stats = RowStats::default();
    for (line_no, line) in data_lines(text) {
        stats.read += 1;
        match parse_kit_row(line) {
            Ok((qty, kit)) => {
                if !items_canonical(line, &kit) {
                    stats.normalized += 1;
                    tracing::debug!(file, line = line_no, kit = %kit.name, "normalized kit items");
                }
                ledger.upsert(&kit, qty);
            }
            Err(e) => {
                stats.skipped += 1;
                tracing::warn!(file, line = line_no, error = %e, "skipping malformed kit row");
            }
        }
    }
    (ledger, stats)
}

pub fn render_components(ledger: &ComponentLedger) -> String {
    ledger
        .list_all()
        .iter()
        .map(|(qty, component)| component_row(*qty, component) + "\n")
        .collect()
}

pub fn render_kits(ledger: &KitLedger) -> String {
    ledger
        .list_all()
        .iter()
        .map(|(qty, kit)| kit_row(*qty, kit) + "\n")
        .collect()
}
