//! Data export
//!
//! - JSON and YAML: every collection in one document
//! - CSV: expenses and monthly budget progress, for spreadsheets

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_budgets_csv, export_expenses_csv};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
