//! # Ledgers
//!
//! In-memory stock maps. Both follow the same zero-removal rule: an entry
//! whose quantity drops to zero is removed, never retained, so every stored
//! quantity is at least 1.
//!
//! Ledgers never error and never check sufficiency; callers compare against
//! `available` before debiting when a shortfall must be rejected.

pub mod components;
pub mod kits;

pub use components::ComponentLedger;
pub use kits::{KitLedger, KitStock};
