//! Category service
//!
//! Create, edit, delete and look up spending categories. Deleting a category
//! leaves expenses and budgets that point at it untouched.

use crate::audit::EntityType;
use crate::error::{FiscalError, FiscalResult};
use crate::models::{Category, CategoryIcon, CategoryId, FormMode};
use crate::storage::Storage;

/// Fields of the category form
#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub icon: CategoryIcon,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>, icon: CategoryIcon) -> Self {
        Self {
            name: name.into(),
            icon,
        }
    }
}

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All categories in stored order
    pub fn list(&self) -> FiscalResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    pub fn get(&self, id: &CategoryId) -> FiscalResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name (case-insensitive) or by id
    pub fn find(&self, identifier: &str) -> FiscalResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }
        self.storage.categories.get(&CategoryId::from_raw(identifier.trim()))
    }

    /// Like [`find`](Self::find) but a miss is a `NotFound` error
    pub fn resolve(&self, identifier: &str) -> FiscalResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| FiscalError::category_not_found(identifier))
    }

    /// Save the category form in either mode
    pub fn submit(&self, mode: FormMode<CategoryId>, draft: CategoryDraft) -> FiscalResult<Category> {
        let name = draft.name.trim().to_string();

        match mode {
            FormMode::Creating => {
                let category = Category::new(name, draft.icon);
                category
                    .validate()
                    .map_err(|e| FiscalError::Validation(e.to_string()))?;

                self.storage.categories.upsert_and_save(category.clone())?;
                tracing::info!(id = %category.id, name = %category.name, "category created");

                self.storage.log_create(
                    EntityType::Category,
                    category.id.to_string(),
                    Some(category.name.clone()),
                    &category,
                );
                Ok(category)
            }
            FormMode::Editing(id) => {
                let before = self
                    .storage
                    .categories
                    .get(&id)?
                    .ok_or_else(|| FiscalError::category_not_found(id.as_str()))?;

                let category = Category {
                    id: before.id.clone(),
                    name,
                    icon: draft.icon,
                };
                category
                    .validate()
                    .map_err(|e| FiscalError::Validation(e.to_string()))?;

                self.storage.categories.upsert_and_save(category.clone())?;
                tracing::info!(id = %category.id, "category updated");

                self.storage.log_update(
                    EntityType::Category,
                    category.id.to_string(),
                    Some(category.name.clone()),
                    &before,
                    &category,
                );
                Ok(category)
            }
        }
    }

    pub fn create(&self, name: &str, icon: CategoryIcon) -> FiscalResult<Category> {
        self.submit(FormMode::Creating, CategoryDraft::new(name, icon))
    }

    /// Change the name and/or icon, keeping whatever isn't given
    pub fn update(
        &self,
        id: &CategoryId,
        name: Option<&str>,
        icon: Option<CategoryIcon>,
    ) -> FiscalResult<Category> {
        let current = self
            .get(id)?
            .ok_or_else(|| FiscalError::category_not_found(id.as_str()))?;

        let draft = CategoryDraft::new(name.unwrap_or(&current.name), icon.unwrap_or(current.icon));
        self.submit(FormMode::Editing(id.clone()), draft)
    }

    /// Delete by id; returns the removed category, `None` if there was none
    pub fn delete(&self, id: &CategoryId) -> FiscalResult<Option<Category>> {
        let removed = self.storage.categories.delete_and_save(id)?;

        if let Some(category) = &removed {
            tracing::info!(id = %category.id, "category deleted");
            self.storage.log_delete(
                EntityType::Category,
                category.id.to_string(),
                Some(category.name.clone()),
                category,
            );
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> Storage {
        let storage = Storage::in_memory();
        storage.load_all().unwrap();
        storage
    }

    #[test]
    fn test_create_trims_and_persists() {
        let storage = storage();
        let service = CategoryService::new(&storage);

        let pets = service.create("  Pets ", CategoryIcon::Bone).unwrap();
        assert_eq!(pets.name, "Pets");
        assert!(pets.id.as_str().starts_with("cat_"));

        storage.categories.load().unwrap();
        assert_eq!(service.list().unwrap().last(), Some(&pets));
    }

    #[test]
    fn test_create_empty_name_fails_before_write() {
        let storage = storage();
        let service = CategoryService::new(&storage);

        let err = service.create("   ", CategoryIcon::Gift).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.list().unwrap().len(), 8);
    }

    #[test]
    fn test_edit_keeps_id() {
        let storage = storage();
        let service = CategoryService::new(&storage);
        let id = CategoryId::from_raw("cat_transport");

        let updated = service.update(&id, Some("Commute"), None).unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.icon, CategoryIcon::Car);
        assert_eq!(service.find("commute").unwrap(), Some(updated));
        assert_eq!(service.list().unwrap().len(), 8);
    }

    #[test]
    fn test_edit_missing_is_not_found() {
        let storage = storage();
        let service = CategoryService::new(&storage);
        let err = service
            .submit(
                FormMode::Editing(CategoryId::from_raw("cat_missing")),
                CategoryDraft::new("X", CategoryIcon::Gift),
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_by_id_or_name() {
        let storage = storage();
        let service = CategoryService::new(&storage);
        assert_eq!(service.find("cat_health").unwrap().unwrap().name, "Health");
        assert_eq!(service.find("HEALTH").unwrap().unwrap().name, "Health");
        assert!(service.resolve("Pets").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let storage = storage();
        let service = CategoryService::new(&storage);

        assert!(service.delete(&CategoryId::from_raw("cat_nope")).unwrap().is_none());
        assert_eq!(service.list().unwrap().len(), 8);

        let removed = service.delete(&CategoryId::from_raw("cat_other")).unwrap();
        assert_eq!(removed.map(|c| c.name), Some("Other".to_string()));
        assert_eq!(service.list().unwrap().len(), 7);
    }
}
