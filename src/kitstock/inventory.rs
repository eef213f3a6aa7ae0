//! # Inventory
//!
//! [`Inventory`] owns both ledgers for the life of the process together with
//! the injected [`Persistence`]. It is the only place stock changes, and every
//! mutating operation follows the same sequence:
//!
//! 1. validate the count and check sufficiency / existence
//! 2. update the in-memory ledger(s)
//! 3. rewrite the affected ledger file(s)
//! 4. append one transaction record
//!
//! A failed check returns `Ok(false)` before step 2, so nothing changes and
//! nothing is recorded. Pack and unpack touch both ledgers; `&mut self`
//! guarantees no observer sees one side without the other. Sharing an
//! `Inventory` across threads means wrapping the whole value in one `Mutex`.
//!
//! An I/O error in steps 3 or 4 is returned as-is: memory already holds the
//! new state, and the files may lag behind it.

use crate::error::{KitStockError, Result};
use crate::fragment::Component;
use crate::ledger::{ComponentLedger, KitLedger};
use crate::model::Kit;
use crate::store::{History, LoadReport, Persistence};
use crate::transaction::{self, Operation, Payload, TransactionRecord};
use chrono::NaiveDateTime;

pub struct Inventory<S: Persistence> {
    store: S,
    components: ComponentLedger,
    kits: KitLedger,
    report: LoadReport,
    clock: fn() -> NaiveDateTime,
}

fn ensure_positive(what: &str, count: u64) -> Result<()> {
    if count == 0 {
        return Err(KitStockError::Validation(format!(
            "{} must be at least 1",
            what
        )));
    }
    Ok(())
}

impl<S: Persistence> Inventory<S> {
    /// Loads both ledgers from `store`.
    pub fn open(store: S) -> Result<Self> {
        let snapshot = store.load()?;
        if snapshot.report.skipped() > 0 {
            tracing::warn!(
                skipped = snapshot.report.skipped(),
                "some stored rows could not be read and were ignored"
            );
        }
        Ok(Self {
            store,
            components: snapshot.components,
            kits: snapshot.kits,
            report: snapshot.report,
            clock: transaction::now,
        })
    }

    /// Replaces the timestamp source used for transaction records.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn load_report(&self) -> LoadReport {
        self.report
    }

    pub fn components(&self) -> &ComponentLedger {
        &self.components
    }

    pub fn kits(&self) -> &KitLedger {
        &self.kits
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn available(&self, component: &Component) -> u64 {
        self.components.available(component)
    }

    pub fn kit_available(&self, name: &str) -> u64 {
        self.kits.available(name)
    }

    /// True when every distinct component of `kit` is stocked at its total
    /// requirement for `count` kits. Repeated items are added together.
    pub fn can_pack(&self, kit: &Kit, count: u64) -> bool {
        kit.requirements(count).is_some_and(|needs| {
            needs
                .iter()
                .all(|(component, needed)| self.components.available(component) >= *needed)
        })
    }

    /// Moves `count` kits' worth of components into kit stock under
    /// `kit.name`, replacing its stored bill of materials with `kit.items`.
    /// Returns false, changing nothing, when components are short.
    pub fn pack(&mut self, kit: &Kit, count: u64) -> Result<bool> {
        ensure_positive("pack count", count)?;
        let needs = match kit.requirements(count) {
            Some(needs) if self.can_pack(kit, count) => needs,
            _ => {
                tracing::debug!(kit = %kit.name, count, "not enough components to pack");
                return Ok(false);
            }
        };

        for (component, needed) in needs {
            self.components.debit(component, needed);
        }
        self.kits.upsert(kit, count);

        self.store.save_components(&self.components)?;
        self.store.save_kits(&self.kits)?;
        self.record(Operation::Pack, count, Payload::Kit(kit.clone()))?;
        tracing::info!(kit = %kit.name, count, "packed kits");
        Ok(true)
    }

    /// True when `name` is stocked with at least `count` kits.
    pub fn can_unpack(&self, name: &str, count: u64) -> bool {
        self.kits.contains(name) && self.kits.available(name) >= count
    }

    /// Breaks `count` kits back into their stored components.
    /// Returns false, changing nothing, when the kit is unknown or short.
    pub fn unpack(&mut self, name: &str, count: u64) -> Result<bool> {
        ensure_positive("unpack count", count)?;
        if !self.can_unpack(name, count) {
            return Ok(false);
        }
        let Some(kit) = self.kits.kit(name) else {
            return Ok(false);
        };

        self.kits.change_quantity(name, -to_delta(count));
        for item in &kit.items {
            self.components
                .credit(&item.component, item.quantity.saturating_mul(count));
        }

        self.store.save_components(&self.components)?;
        self.store.save_kits(&self.kits)?;
        self.record(Operation::Unpack, count, Payload::Kit(kit))?;
        tracing::info!(kit = name, count, "unpacked kits");
        Ok(true)
    }

    pub fn buy_component(&mut self, component: &Component, qty: u64) -> Result<()> {
        ensure_positive("quantity", qty)?;
        self.components.credit(component, qty);
        self.store.save_components(&self.components)?;
        self.record(
            Operation::PurchaseOrder,
            qty,
            Payload::Component(component.clone()),
        )?;
        tracing::info!(component = %component, qty, "bought components");
        Ok(())
    }

    /// Returns false, changing nothing, when fewer than `qty` are on hand.
    pub fn sell_component(&mut self, component: &Component, qty: u64) -> Result<bool> {
        ensure_positive("quantity", qty)?;
        if self.components.available(component) < qty {
            return Ok(false);
        }
        self.components.debit(component, qty);
        self.store.save_components(&self.components)?;
        self.record(
            Operation::CustomerSale,
            qty,
            Payload::Component(component.clone()),
        )?;
        tracing::info!(component = %component, qty, "sold components");
        Ok(true)
    }

    /// Restocks an existing kit. Returns false for a kit never packed.
    pub fn buy_kit(&mut self, name: &str, qty: u64) -> Result<bool> {
        ensure_positive("quantity", qty)?;
        let Some(kit) = self.kits.kit(name) else {
            return Ok(false);
        };
        self.kits.upsert(&kit, qty);
        self.store.save_kits(&self.kits)?;
        self.record(Operation::PurchaseOrder, qty, Payload::Kit(kit))?;
        tracing::info!(kit = name, qty, "bought kits");
        Ok(true)
    }

    /// Returns false when the kit is unknown or fewer than `qty` are stocked.
    pub fn sell_kit(&mut self, name: &str, qty: u64) -> Result<bool> {
        ensure_positive("quantity", qty)?;
        if self.kits.available(name) < qty {
            return Ok(false);
        }
        let Some(kit) = self.kits.kit(name) else {
            return Ok(false);
        };
        self.kits.change_quantity(name, -to_delta(qty));
        self.store.save_kits(&self.kits)?;
        self.record(Operation::CustomerSale, qty, Payload::Kit(kit))?;
        tracing::info!(kit = name, qty, "sold kits");
        Ok(true)
    }

    pub fn history(&self) -> Result<History> {
        self.store.load_transactions()
    }

    fn record(&mut self, operation: Operation, quantity: u64, payload: Payload) -> Result<()> {
        let record = TransactionRecord::new(operation, (self.clock)(), quantity, payload);
        self.store.append_transaction(&record)
    }
}

fn to_delta(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
