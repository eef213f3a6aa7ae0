use crate::fragment::Component;
use std::collections::HashMap;

/// On-hand quantity per component, keyed by the typed fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentLedger {
    stock: HashMap<Component, u64>,
}

impl ComponentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta` (possibly negative) to the current quantity, treating an
    /// absent entry as zero. Results at or below zero remove the entry.
    pub fn change_quantity(&mut self, component: &Component, delta: i64) {
        if delta >= 0 {
            self.credit(component, delta.unsigned_abs());
        } else {
            self.debit(component, delta.unsigned_abs());
        }
    }

    pub fn credit(&mut self, component: &Component, amount: u64) {
        if amount == 0 {
            return;
        }
        let entry = self.stock.entry(component.clone()).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Removes up to `amount`; the entry disappears once it reaches zero.
    pub fn debit(&mut self, component: &Component, amount: u64) {
        let remaining = self.available(component).saturating_sub(amount);
        if remaining == 0 {
            self.stock.remove(component);
        } else {
            self.stock.insert(component.clone(), remaining);
        }
    }

    /// Zero for components never stocked.
    pub fn available(&self, component: &Component) -> u64 {
        self.stock.get(component).copied().unwrap_or(0)
    }

    /// `(quantity, component)` ordered by fragment text, then quantity.
    pub fn list_all(&self) -> Vec<(u64, Component)> {
        let mut rows: Vec<(String, u64, Component)> = self
            .stock
            .iter()
            .map(|(component, qty)| (component.encode(), *qty, component.clone()))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        rows.into_iter().map(|(_, qty, c)| (qty, c)).collect()
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }
}
