use crate::error::{KitStockError, ParseError, Result};
use crate::fragment::{Component, Price};
use std::fmt;
use std::str::FromStr;

/// One bill-of-materials line: `quantity` units of `component` per kit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitItem {
    pub quantity: u64,
    pub component: Component,
}

impl KitItem {
    pub fn new(quantity: u64, component: Component) -> Self {
        Self {
            quantity,
            component,
        }
    }
}

impl fmt::Display for KitItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.quantity, self.component)
    }
}

/// Parses `QTY:FRAGMENT`, e.g. `2:LED Light,red,3.0,20,0.50`.
impl FromStr for KitItem {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (qty, fragment) = s
            .split_once(':')
            .ok_or_else(|| ParseError::Row(format!("expected QTY:FRAGMENT, got {:?}", s)))?;
        let quantity: u64 = qty.trim().parse().map_err(|_| ParseError::InvalidNumber {
            field: "item quantity",
            value: qty.trim().to_string(),
        })?;
        Ok(Self::new(quantity, fragment.parse()?))
    }
}

/// A named bundle of components. The name is the kit's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kit {
    pub name: String,
    pub items: Vec<KitItem>,
}

impl Kit {
    pub fn new(name: impl Into<String>, items: Vec<KitItem>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    /// Checks a kit being defined by a user: a usable name and a non-empty
    /// bill of materials with positive item quantities and no repeated
    /// component.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        if self.items.is_empty() {
            return Err(KitStockError::Validation(format!(
                "kit {} has no components",
                self.name
            )));
        }
        if let Some(item) = self.items.iter().find(|item| item.quantity == 0) {
            return Err(KitStockError::Validation(format!(
                "item quantity must be at least 1: {}",
                item.component
            )));
        }
        for (i, item) in self.items.iter().enumerate() {
            if self.items[..i].iter().any(|prev| prev.component == item.component) {
                return Err(KitStockError::Validation(format!(
                    "component listed twice in kit {}: {}",
                    self.name, item.component
                )));
            }
        }
        Ok(())
    }

    /// Total units of each distinct component needed for `count` kits, in
    /// first-listed order. None if a total overflows.
    pub fn requirements(&self, count: u64) -> Option<Vec<(&Component, u64)>> {
        let mut totals: Vec<(&Component, u64)> = Vec::new();
        for item in &self.items {
            let needed = item.quantity.checked_mul(count)?;
            match totals.iter_mut().find(|(c, _)| *c == &item.component) {
                Some((_, total)) => *total = total.checked_add(needed)?,
                None => totals.push((&item.component, needed)),
            }
        }
        Some(totals)
    }

    /// Component cost of one kit: item quantity times component price, summed.
    pub fn unit_cost(&self) -> Price {
        self.items
            .iter()
            .map(|item| item.component.price().times(item.quantity))
            .sum()
    }

    /// `[item_qty, kind, fields..., item_qty, kind, fields...]`
    pub fn flat_items(&self) -> Vec<String> {
        let mut out = Vec::new();
        for item in &self.items {
            out.push(item.quantity.to_string());
            out.push(item.component.kind().label().to_string());
            out.extend(item.component.fields());
        }
        out
    }
}

pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(KitStockError::Validation("kit name cannot be empty".into()));
    }
    if name.contains(',') || name.contains('\n') || name.trim() != name {
        return Err(KitStockError::Validation(format!(
            "kit name cannot contain commas, line breaks or surrounding spaces: {:?}",
            name
        )));
    }
    Ok(())
}
