//! Category repository
//!
//! The only collection with seed data: when the `categories` entry is absent
//! the default set is written on first load.

use crate::error::FiscalResult;
use crate::models::{default_categories, Category, GROCERY_CATEGORY_NAME};

use super::collection::Collection;

pub type CategoryRepository = Collection<Category>;

impl Collection<Category> {
    /// Load categories, seeding and persisting the defaults if none are stored
    ///
    /// Returns `true` when the defaults were seeded.
    pub fn load_or_seed(&self) -> FiscalResult<bool> {
        if self.load()? {
            return Ok(false);
        }
        tracing::info!("no stored categories, seeding defaults");
        self.replace_all(default_categories())?;
        self.save()?;
        Ok(true)
    }

    /// Case-insensitive lookup by name
    pub fn get_by_name(&self, name: &str) -> FiscalResult<Option<Category>> {
        let name = name.trim();
        self.find(|c| c.name.trim().eq_ignore_ascii_case(name))
    }

    /// The category receipt scans are filed under
    pub fn grocery(&self) -> FiscalResult<Option<Category>> {
        self.get_by_name(GROCERY_CATEGORY_NAME)
    }

    pub fn name_exists(&self, name: &str) -> FiscalResult<bool> {
        Ok(self.get_by_name(name)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryIcon, CategoryId};
    use crate::storage::store::{CollectionStore, JsonFileStore, MemoryStore};
    use tempfile::TempDir;

    #[test]
    fn test_seeds_defaults_on_first_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        let repo = CategoryRepository::new(Box::new(JsonFileStore::new("categories", path.clone())));

        assert!(repo.load_or_seed().unwrap());
        assert_eq!(repo.count().unwrap(), 8);
        assert!(path.exists());

        // Second load reads what was written
        assert!(!repo.load_or_seed().unwrap());
        let grocery = repo.grocery().unwrap().unwrap();
        assert_eq!(grocery.id, CategoryId::from_raw("cat_grocery"));
        assert_eq!(grocery.icon, CategoryIcon::ShoppingCart);
    }

    #[test]
    fn test_empty_stored_list_is_not_reseeded() {
        let store: MemoryStore<Category> = MemoryStore::with_items("categories", Vec::new());
        assert_eq!(store.load().unwrap(), Some(Vec::new()));

        let repo = CategoryRepository::new(Box::new(store));
        assert!(!repo.load_or_seed().unwrap());
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.grocery().unwrap().is_none());
    }

    #[test]
    fn test_get_by_name_ignores_case() {
        let repo = CategoryRepository::new(Box::new(MemoryStore::new("categories")));
        repo.load_or_seed().unwrap();

        assert!(repo.get_by_name("  grocery ").unwrap().is_some());
        assert!(repo.name_exists("HEALTH").unwrap());
        assert!(!repo.name_exists("Pets").unwrap());
    }
}
