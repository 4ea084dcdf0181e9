//! Category CLI commands

use clap::Subcommand;

use crate::display::{format_category_list, format_icon_list};
use crate::error::{FiscalError, FiscalResult};
use crate::models::CategoryIcon;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Icon name (see `category icons`)
        #[arg(short, long, default_value = "Sparkles")]
        icon: String,
    },

    /// Rename a category or change its icon
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New icon name
        #[arg(short, long)]
        icon: Option<String>,
    },

    /// Delete a category (expenses and budgets that use it are kept)
    Delete {
        /// Category name or ID
        category: String,
    },

    /// List the available icons
    Icons,
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> FiscalResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()?));
        }

        CategoryCommands::Add { name, icon } => {
            let icon: CategoryIcon = icon.parse()?;
            let category = service.create(&name, icon)?;
            println!("Created category: {} {}", category.icon.glyph(), category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Edit {
            category,
            name,
            icon,
        } => {
            if name.is_none() && icon.is_none() {
                return Err(FiscalError::Validation(
                    "Nothing to change; pass --name and/or --icon".into(),
                ));
            }
            let icon = icon.as_deref().map(str::parse::<CategoryIcon>).transpose()?;
            let current = service.resolve(&category)?;
            let updated = service.update(&current.id, name.as_deref(), icon)?;
            println!("Updated category: {} {}", updated.icon.glyph(), updated.name);
        }

        CategoryCommands::Delete { category } => {
            let target = service.resolve(&category)?;
            let in_use = storage.expenses.get_by_category(&target.id)?.len();
            if let Some(removed) = service.delete(&target.id)? {
                println!("Deleted category: {}", removed.name);
                if in_use > 0 {
                    println!("  {} expense(s) still reference it and will show as Unknown.", in_use);
                }
            }
        }

        CategoryCommands::Icons => {
            print!("{}", format_icon_list());
        }
    }

    Ok(())
}
