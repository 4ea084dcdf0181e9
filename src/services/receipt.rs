//! Receipt intake
//!
//! Scanned items land in a [`ReceiptDraft`] where they can be corrected or
//! dropped before the draft is saved as one grocery expense.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::audit::EntityType;
use crate::error::{FiscalError, FiscalResult};
use crate::models::{Expense, GroceryItem, ItemId, Money, GROCERY_CATEGORY_NAME};
use crate::storage::Storage;

/// Extracted items under review
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptDraft {
    items: Vec<GroceryItem>,
}

impl ReceiptDraft {
    pub fn new(items: Vec<GroceryItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[GroceryItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> Money {
        self.items.iter().map(|i| i.price).sum()
    }

    /// Correct an item's name and/or price
    ///
    /// The name must stay non-empty and the price may be zero but not negative.
    pub fn edit_item(
        &mut self,
        id: &ItemId,
        name: Option<&str>,
        price: Option<Money>,
    ) -> FiscalResult<&GroceryItem> {
        let index = self
            .items
            .iter()
            .position(|i| &i.id == id)
            .ok_or_else(|| FiscalError::NotFound {
                entity_type: "Receipt item",
                identifier: id.to_string(),
            })?;

        let name = name.map(str::trim).unwrap_or(self.items[index].name.as_str());
        let price = price.unwrap_or(self.items[index].price);
        if name.is_empty() || price.is_negative() {
            return Err(FiscalError::Validation(
                "Item name and a price of zero or more are required".into(),
            ));
        }

        let name = name.to_string();
        let item = &mut self.items[index];
        item.name = name;
        item.price = price;
        Ok(item)
    }

    /// Drop an item; unknown ids are ignored
    pub fn remove_item(&mut self, id: &ItemId) -> Option<GroceryItem> {
        let index = self.items.iter().position(|i| &i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Look up an item by full id or by 1-based position
    pub fn find_item(&self, reference: &str) -> Option<&GroceryItem> {
        if let Ok(position) = reference.parse::<usize>() {
            return position.checked_sub(1).and_then(|i| self.items.get(i));
        }
        self.items.iter().find(|i| i.id.as_str() == reference)
    }
}

/// Files a reviewed receipt as an expense
pub struct ReceiptService<'a> {
    storage: &'a Storage,
}

impl<'a> ReceiptService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Save the draft as one expense in the grocery category, dated now
    ///
    /// The amount is the sum of item prices.
    pub fn save(&self, draft: &ReceiptDraft) -> FiscalResult<Expense> {
        if draft.is_empty() {
            return Err(FiscalError::Validation("No items to save".into()));
        }

        let grocery = self
            .storage
            .categories
            .grocery()?
            .ok_or_else(|| FiscalError::category_not_found(GROCERY_CATEGORY_NAME))?;

        let total = draft.total();
        if !total.is_positive() {
            return Err(FiscalError::Validation(
                "Receipt total must be greater than zero".into(),
            ));
        }

        let now = Utc::now();
        let mut expense = Expense::new(grocery.id.clone(), total, now);
        expense.notes = Some(format!(
            "{} receipt scanned on {}",
            grocery.name,
            now.format("%Y-%m-%d")
        ));
        expense.items = Some(draft.items().to_vec());
        expense
            .validate()
            .map_err(|e| FiscalError::Validation(e.to_string()))?;

        self.storage.expenses.upsert_and_save(expense.clone())?;
        tracing::info!(id = %expense.id, items = expense.item_count(), total = %total, "receipt saved");

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(format!("{} in {}", total, grocery.name)),
            &expense,
        );
        Ok(expense)
    }
}
