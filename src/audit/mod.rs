//! Audit trail for Fiscally Fit
//!
//! Every create, update, delete and clear is appended to `audit.log` as one
//! JSON line with the record's before/after values.
//!
//! - `AuditEntry`: one logged operation
//! - `AuditLogger`: append-only JSONL writer and reader
//! - `generate_diff`: short field-level summary for updates

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
