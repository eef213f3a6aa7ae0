use crate::model::{Kit, KitItem};
use std::collections::HashMap;

/// Stocked quantity of one kit plus its bill of materials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitStock {
    pub quantity: u64,
    pub items: Vec<KitItem>,
}

/// Kit stock keyed by kit name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KitLedger {
    kits: HashMap<String, KitStock>,
}

impl KitLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta` to the kit's quantity and replaces its item list with
    /// `kit.items`, creating the entry when the name is new. An entry that
    /// would hold zero kits is not kept.
    pub fn upsert(&mut self, kit: &Kit, delta: u64) {
        let quantity = self.available(&kit.name).saturating_add(delta);
        if quantity == 0 {
            self.kits.remove(&kit.name);
            return;
        }
        self.kits.insert(
            kit.name.clone(),
            KitStock {
                quantity,
                items: kit.items.clone(),
            },
        );
    }

    /// Applies `delta` to a known kit. Returns false, changing nothing, when
    /// the name is unknown.
    pub fn change_quantity(&mut self, name: &str, delta: i64) -> bool {
        let Some(entry) = self.kits.get_mut(name) else {
            return false;
        };
        let next = if delta >= 0 {
            entry.quantity.saturating_add(delta.unsigned_abs())
        } else {
            entry.quantity.saturating_sub(delta.unsigned_abs())
        };
        if next == 0 {
            self.kits.remove(name);
        } else {
            entry.quantity = next;
        }
        true
    }

    pub fn available(&self, name: &str) -> u64 {
        self.kits.get(name).map(|entry| entry.quantity).unwrap_or(0)
    }

    pub fn get(&self, name: &str) -> Option<&KitStock> {
        self.kits.get(name)
    }

    /// The kit as currently defined, if it is stocked.
    pub fn kit(&self, name: &str) -> Option<Kit> {
        self.kits
            .get(name)
            .map(|entry| Kit::new(name, entry.items.clone()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kits.contains_key(name)
    }

    /// `(quantity, kit)` ordered by kit name.
    pub fn list_all(&self) -> Vec<(u64, Kit)> {
        let mut rows: Vec<(u64, Kit)> = self
            .kits
            .iter()
            .map(|(name, entry)| (entry.quantity, Kit::new(name.clone(), entry.items.clone())))
            .collect();
        rows.sort_by(|a, b| a.1.name.cmp(&b.1.name));
        rows
    }

    pub fn len(&self) -> usize {
        self.kits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kit(name: &str, items: &[&str]) -> Kit {
        Kit::new(name, items.iter().map(|s| s.parse().unwrap()).collect())
    }

    #[test]
    fn upsert_creates_then_merges_and_replaces_items() {
        let mut ledger = KitLedger::new();
        ledger.upsert(&kit("Light Circuit", &["1:Battery,AA,1.5,3.10"]), 2);
        ledger.upsert(
            &kit(
                "Light Circuit",
                &["1:Battery,AA,1.5,3.10", "2:LED Light,red,3.0,20,0.50"],
            ),
            3,
        );

        let entry = ledger.get("Light Circuit").unwrap();
        assert_eq!(entry.quantity, 5);
        assert_eq!(entry.items.len(), 2);
    }

    #[test]
    fn upsert_with_zero_does_not_create_an_entry() {
        let mut ledger = KitLedger::new();
        ledger.upsert(&kit("Ghost", &["1:Wire,100,0.50"]), 0);
        assert!(!ledger.contains("Ghost"));
    }

    #[test]
    fn change_quantity_on_unknown_kit_fails() {
        let mut ledger = KitLedger::new();
        assert!(!ledger.change_quantity("Nope", 1));
        assert!(ledger.is_empty());
    }

    #[test]
    fn change_quantity_removes_at_zero() {
        let mut ledger = KitLedger::new();
        ledger.upsert(&kit("Sensor Circuit", &["1:Sensor,light,5.0,2.40"]), 2);

        assert!(ledger.change_quantity("Sensor Circuit", -1));
        assert_eq!(ledger.available("Sensor Circuit"), 1);

        assert!(ledger.change_quantity("Sensor Circuit", -1));
        assert!(!ledger.contains("Sensor Circuit"));
        assert_eq!(ledger.available("Sensor Circuit"), 0);
    }

    #[test]
    fn list_all_is_sorted_by_name() {
        let mut ledger = KitLedger::new();
        ledger.upsert(&kit("Sensor Circuit", &["1:Sensor,light,5.0,2.40"]), 1);
        ledger.upsert(&kit("Alarm", &["1:Buzzer,2400.0,85,5.0,30,1.95"]), 4);
        ledger.upsert(&kit("Light Circuit", &["1:Battery,AA,1.5,3.10"]), 2);

        let names: Vec<String> = ledger.list_all().into_iter().map(|(_, k)| k.name).collect();
        assert_eq!(names, vec!["Alarm", "Light Circuit", "Sensor Circuit"]);
        assert_eq!(ledger.kit("Alarm").unwrap().items.len(), 1);
    }
}
