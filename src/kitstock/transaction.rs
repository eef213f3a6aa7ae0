//! # Transaction Records
//!
//! Every stock-affecting operation appends exactly one row to the
//! transaction file:
//!
//! ```text
//! Purchase Order,2026-10-18 09:30:00,20,Wire,100,0.50
//! Pack,2026-10-18 09:31:12,1,Light Circuit,1,Battery,AA,1.5,3.10,2,LED Light,red,3.0,20,0.50
//! ```
//!
//! Component operations carry the flattened fragment; kit operations carry
//! the kit name followed by its flattened bill of materials. Rows are never
//! rewritten; file order is chronological order.
//!
//! Older files wrote the timestamp with a leading space (`, 2026-...`).
//! Fields are trimmed on read so both forms load; [`TimestampStyle::Padded`]
//! keeps writing the old form.

use crate::error::ParseError;
use crate::fragment::Component;
use crate::model::Kit;
use crate::rows::{join_row, parse_items, split_row};
use chrono::{Local, NaiveDateTime, Timelike};
use std::fmt;
use std::str::FromStr;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    PurchaseOrder,
    CustomerSale,
    Pack,
    Unpack,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::PurchaseOrder => "Purchase Order",
            Operation::CustomerSale => "Customer Sale",
            Operation::Pack => "Pack",
            Operation::Unpack => "Unpack",
        }
    }

    /// Pack and unpack always move kits.
    fn always_kit(self) -> bool {
        matches!(self, Operation::Pack | Operation::Unpack)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Operation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Operation::PurchaseOrder,
            Operation::CustomerSale,
            Operation::Pack,
            Operation::Unpack,
        ]
        .into_iter()
        .find(|op| op.label().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| ParseError::Row(format!("unknown operation {:?}", s.trim())))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Component(Component),
    Kit(Kit),
}

impl Payload {
    fn fields(&self) -> Vec<String> {
        match self {
            Payload::Component(component) => {
                let mut out = vec![component.kind().label().to_string()];
                out.extend(component.fields());
                out
            }
            Payload::Kit(kit) => {
                let mut out = vec![kit.name.clone()];
                out.extend(kit.flat_items());
                out
            }
        }
    }

    /// Short human label: the fragment, or the kit name.
    pub fn label(&self) -> String {
        match self {
            Payload::Component(component) => component.encode(),
            Payload::Kit(kit) => kit.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampStyle {
    #[default]
    Plain,
    /// `" " + timestamp`, as written by older versions.
    Padded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub operation: Operation,
    pub timestamp: NaiveDateTime,
    pub quantity: u64,
    pub payload: Payload,
}

impl TransactionRecord {
    pub fn new(
        operation: Operation,
        timestamp: NaiveDateTime,
        quantity: u64,
        payload: Payload,
    ) -> Self {
        Self {
            operation,
            timestamp,
            quantity,
            payload,
        }
    }

    pub fn to_row(&self, style: TimestampStyle) -> String {
        let stamp = self.timestamp.format(TIMESTAMP_FORMAT).to_string();
        let stamp = match style {
            TimestampStyle::Plain => stamp,
            TimestampStyle::Padded => format!(" {}", stamp),
        };
        let mut fields = vec![
            self.operation.label().to_string(),
            stamp,
            self.quantity.to_string(),
        ];
        fields.extend(self.payload.fields());
        join_row(&fields)
    }

    pub fn from_row(line: &str) -> Result<Self, ParseError> {
        let fields = split_row(line);
        if fields.len() < 4 {
            return Err(ParseError::Row(line.to_string()));
        }
        let operation: Operation = fields[0].parse()?;
        let timestamp = NaiveDateTime::parse_from_str(fields[1], TIMESTAMP_FORMAT)
            .map_err(|_| ParseError::Row(format!("bad timestamp {:?}", fields[1])))?;
        let quantity: u64 = fields[2].parse().map_err(|_| ParseError::InvalidNumber {
            field: "quantity",
            value: fields[2].to_string(),
        })?;
        let payload = parse_payload(operation, &fields[3..])?;
        Ok(Self::new(operation, timestamp, quantity, payload))
    }
}

/// Purchases and sales may name either a component or a kit; a payload that
/// decodes as a component is taken as one.
fn parse_payload(operation: Operation, fields: &[&str]) -> Result<Payload, ParseError> {
    if !operation.always_kit() {
        if let Ok(component) = Component::decode(&join_row(fields)) {
            return Ok(Payload::Component(component));
        }
    }
    let name = fields[0];
    if name.is_empty() {
        return Err(ParseError::EmptyField("kit name"));
    }
    Ok(Payload::Kit(Kit::new(name, parse_items(&fields[1..])?)))
}

/// Current local time truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
