//! Full YAML export

use std::io::Write;

use crate::error::{FiscalError, FiscalResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> FiscalResult<()> {
    let export = FullExport::from_storage(storage)?;

    write!(
        writer,
        "# Fiscally Fit data export\n# Generated: {}\n# App version: {}\n\n",
        export.exported_at.format("%Y-%m-%d %H:%M:%S UTC"),
        export.app_version
    )
    .map_err(|e| FiscalError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FiscalError::Export(e.to_string()))
}
