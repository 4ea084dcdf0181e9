//! Fiscally Fit - personal budgeting from the terminal
//!
//! Track spending by category, set monthly budget goals per category and turn
//! photographed grocery receipts into itemized expenses.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths and user settings
//! - `error`: Custom error types
//! - `models`: Categories, expenses, budgets and the value types behind them
//! - `storage`: JSON collections behind a swappable store interface
//! - `services`: Business rules for each view
//! - `extraction`: Receipt image to grocery items via a structured-output model
//! - `audit`: Append-only log of every change
//! - `backup`: Dated archives with retention, and restore
//! - `export`: JSON, YAML and CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `fiscally` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fiscally_fit::config::paths::FiscalPaths;
//! use fiscally_fit::services::BudgetService;
//! use fiscally_fit::storage::Storage;
//!
//! let storage = Storage::new(FiscalPaths::new()?)?;
//! storage.load_all()?;
//! let statuses = BudgetService::new(&storage).list_for_month("2024-05".parse()?)?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod extraction;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FiscalError, FiscalResult};
