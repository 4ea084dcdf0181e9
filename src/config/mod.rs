//! Configuration module for Fiscally Fit
//!
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FiscalPaths;
pub use settings::{ExtractionSettings, Settings, Theme};
