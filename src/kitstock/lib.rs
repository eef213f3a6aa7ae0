//! # Kitstock Architecture
//!
//! Kitstock keeps stock of electronic components and of the circuit kits
//! packed from them. It is a library with a CLI client, not the other way
//! round: everything from [`api`] inward works on Rust values and never
//! touches the terminal.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - clap parsing, colored tables, exit codes                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - parses fragments and QTY:FRAGMENT items                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - one operation each, returns CmdResult + messages         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Inventory (inventory.rs)                                   │
//! │  - owns both ledgers, pack/unpack, buy/sell                 │
//! │  - flushes ledgers, then appends one transaction            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - Persistence trait: FileStore, InMemoryStore              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Components and fragments
//!
//! A component is identified by its whole description, written as a
//! comma-joined *fragment*: `Battery,AA,1.5,3.10`. [`fragment::Component`]
//! stores numeric attributes as fixed-point values, so two fragments that
//! differ only in number formatting (`1.50` vs `1.5`) are the same ledger
//! key.
//!
//! ## Module Overview
//!
//! - [`api`]: facade, entry point for all operations
//! - [`commands`]: one module per user operation
//! - [`inventory`]: the stock engine
//! - [`ledger`]: component and kit quantity maps
//! - [`fragment`], [`model`]: components, kits, bills of materials
//! - [`rows`], [`transaction`]: on-disk row formats
//! - [`store`]: persistence trait and implementations
//! - [`config`], [`init`], [`logging`]: process setup
//! - [`error`]: error types
//! - `cli`: argument parsing and output for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod fragment;
pub mod init;
pub mod inventory;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod rows;
pub mod store;
pub mod transaction;
