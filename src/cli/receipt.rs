//! Receipt CLI commands
//!
//! `scan` extracts items into a pending draft kept next to the settings file.
//! The draft can be corrected with `edit`/`remove` before `save` files it as a
//! grocery expense.

use std::path::Path;

use clap::Subcommand;

use super::parse_amount;
use crate::config::paths::FiscalPaths;
use crate::config::settings::Settings;
use crate::display::format_receipt_draft;
use crate::error::{FiscalError, FiscalResult};
use crate::extraction::{GeminiModel, ReceiptExtractor, StructuredModel};
use crate::models::GroceryItem;
use crate::services::{ReceiptDraft, ReceiptService};
use crate::storage::file_io::remove_if_exists;
use crate::storage::{read_json_optional, write_json_atomic, Storage};

/// Receipt subcommands
#[derive(Subcommand)]
pub enum ReceiptCommands {
    /// Extract items from a receipt image (file path or data: URI)
    Scan {
        /// Image file or `data:image/...;base64,...` URI
        image: String,
        /// Save straight away instead of keeping a draft
        #[arg(long)]
        save: bool,
    },

    /// Show the pending draft
    Show,

    /// Correct a draft item
    Edit {
        /// Item number (as shown) or item ID
        item: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New price
        #[arg(short, long)]
        price: Option<String>,
    },

    /// Drop a draft item
    Remove {
        /// Item number (as shown) or item ID
        item: String,
    },

    /// Save the draft as a grocery expense
    Save,

    /// Throw the draft away
    Discard,
}

/// Run extraction on a file path or a data URI
pub fn scan_source<M: StructuredModel>(
    extractor: &ReceiptExtractor<M>,
    source: &str,
) -> FiscalResult<Vec<GroceryItem>> {
    if source.trim_start().starts_with("data:") {
        extractor.extract(source)
    } else {
        extractor.extract_file(Path::new(source))
    }
}

fn load_draft(paths: &FiscalPaths) -> FiscalResult<ReceiptDraft> {
    read_json_optional(paths.receipt_draft_file())?.ok_or_else(|| FiscalError::NotFound {
        entity_type: "Receipt draft",
        identifier: "pending".into(),
    })
}

fn store_draft(paths: &FiscalPaths, draft: &ReceiptDraft) -> FiscalResult<()> {
    write_json_atomic(paths.receipt_draft_file(), draft)
}

fn draft_item_id(draft: &ReceiptDraft, reference: &str) -> FiscalResult<crate::models::ItemId> {
    draft
        .find_item(reference)
        .map(|item| item.id.clone())
        .ok_or_else(|| FiscalError::NotFound {
            entity_type: "Receipt item",
            identifier: reference.to_string(),
        })
}

fn save_draft(storage: &Storage, paths: &FiscalPaths, draft: &ReceiptDraft, symbol: &str) -> FiscalResult<()> {
    let expense = ReceiptService::new(storage).save(draft)?;
    remove_if_exists(paths.receipt_draft_file())?;
    println!(
        "Saved receipt: {} across {} item(s)",
        expense.amount.format_with_symbol(symbol),
        expense.item_count()
    );
    println!("  ID: {}", expense.id);
    Ok(())
}

/// Handle a receipt command
pub fn handle_receipt_command(
    storage: &Storage,
    paths: &FiscalPaths,
    settings: &Settings,
    cmd: ReceiptCommands,
) -> FiscalResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReceiptCommands::Scan { image, save } => {
            let extractor = ReceiptExtractor::new(GeminiModel::from_settings(&settings.extraction)?);
            println!("Scanning receipt...");
            let draft = ReceiptDraft::new(scan_source(&extractor, &image)?);
            print!("{}", format_receipt_draft(&draft, symbol));

            if save {
                save_draft(storage, paths, &draft, symbol)?;
            } else {
                store_draft(paths, &draft)?;
                println!();
                println!("Review with 'fiscally receipt edit|remove', then 'fiscally receipt save'.");
            }
        }

        ReceiptCommands::Show => {
            print!("{}", format_receipt_draft(&load_draft(paths)?, symbol));
        }

        ReceiptCommands::Edit { item, name, price } => {
            let mut draft = load_draft(paths)?;
            let id = draft_item_id(&draft, &item)?;
            let price = price.as_deref().map(parse_amount).transpose()?;
            draft.edit_item(&id, name.as_deref(), price)?;
            store_draft(paths, &draft)?;
            print!("{}", format_receipt_draft(&draft, symbol));
        }

        ReceiptCommands::Remove { item } => {
            let mut draft = load_draft(paths)?;
            let id = draft_item_id(&draft, &item)?;
            draft.remove_item(&id);
            store_draft(paths, &draft)?;
            print!("{}", format_receipt_draft(&draft, symbol));
        }

        ReceiptCommands::Save => {
            let draft = load_draft(paths)?;
            save_draft(storage, paths, &draft, symbol)?;
        }

        ReceiptCommands::Discard => {
            if remove_if_exists(paths.receipt_draft_file())? {
                println!("Receipt draft discarded.");
            } else {
                println!("No receipt draft pending.");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::GenerationRequest;
    use crate::models::Money;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    struct CannedModel;

    impl StructuredModel for CannedModel {
        fn generate(&self, _request: &GenerationRequest<'_>) -> FiscalResult<Value> {
            Ok(json!({ "items": [{ "name": "Eggs", "price": 3.1 }] }))
        }
    }

    #[test]
    fn test_scan_source_accepts_data_uri_and_file() {
        let extractor = ReceiptExtractor::new(CannedModel);

        let items = scan_source(&extractor, "data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(items[0].price, Money::from_cents(310));

        let temp_dir = TempDir::new().unwrap();
        let image = temp_dir.path().join("receipt.jpg");
        std::fs::write(&image, b"jpeg bytes").unwrap();
        assert_eq!(scan_source(&extractor, image.to_str().unwrap()).unwrap().len(), 1);

        let missing = temp_dir.path().join("missing.png");
        assert!(scan_source(&extractor, missing.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_draft_round_trip_and_save() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FiscalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();

        assert!(load_draft(&paths).unwrap_err().is_not_found());

        let draft = ReceiptDraft::new(vec![
            GroceryItem::new("Milk", Money::from_cents(250)),
            GroceryItem::new("Bread", Money::from_cents(320)),
        ]);
        store_draft(&paths, &draft).unwrap();
        let loaded = load_draft(&paths).unwrap();
        assert_eq!(loaded, draft);
        assert_eq!(draft_item_id(&loaded, "2").unwrap(), draft.items()[1].id);

        save_draft(&storage, &paths, &loaded, "$").unwrap();
        assert!(!paths.receipt_draft_file().exists());
        assert_eq!(storage.expenses.count().unwrap(), 1);
    }
}
