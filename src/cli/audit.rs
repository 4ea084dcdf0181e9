//! Audit log command

use crate::error::FiscalResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, limit: usize, verbose: bool) -> FiscalResult<()> {
    let Some(audit) = storage.audit() else {
        println!("No audit log for this storage.");
        return Ok(());
    };

    let entries = audit.read_recent(limit)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
        if verbose {
            if let Some(before) = &entry.before {
                println!("  Before: {}", before);
            }
            if let Some(after) = &entry.after {
                println!("  After:  {}", after);
            }
        }
    }
    Ok(())
}
