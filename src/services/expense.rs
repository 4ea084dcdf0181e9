//! Expense service
//!
//! Records spending events. Itemized lists are only kept on expenses filed
//! under the grocery category.

use crate::audit::EntityType;
use crate::error::{FiscalError, FiscalResult};
use crate::models::{CategoryId, Expense, ExpenseDate, ExpenseId, FormMode, GroceryItem, ItemId, Money, MonthYear};
use crate::storage::Storage;

/// Fields of the expense form
///
/// Required fields are optional here so a half-filled form can be validated
/// in one place.
#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub date: Option<ExpenseDate>,
    pub notes: Option<String>,
    pub items: Vec<GroceryItem>,
}

impl ExpenseDraft {
    pub fn new(category_id: CategoryId, amount: Money, date: impl Into<ExpenseDate>) -> Self {
        Self {
            category_id: Some(category_id),
            amount: Some(amount),
            date: Some(date.into()),
            ..Self::default()
        }
    }

    /// Prefill the form from an existing expense
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            category_id: Some(expense.category_id.clone()),
            amount: Some(expense.amount),
            date: Some(expense.date.clone()),
            notes: expense.notes.clone(),
            items: expense.items.clone().unwrap_or_default(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Add a manually entered grocery item; needs a name and a positive price
    pub fn add_item(&mut self, name: &str, price: Money) -> FiscalResult<&GroceryItem> {
        let name = name.trim();
        if name.is_empty() || !price.is_positive() {
            return Err(FiscalError::Validation(
                "Item name and a price greater than zero are required".into(),
            ));
        }
        self.items.push(GroceryItem::new(name, price));
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn remove_item(&mut self, id: &ItemId) -> Option<GroceryItem> {
        let index = self.items.iter().position(|i| &i.id == id)?;
        Some(self.items.remove(index))
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All expenses, newest first
    pub fn list(&self) -> FiscalResult<Vec<Expense>> {
        self.storage.expenses.get_all_by_date_desc()
    }

    /// Expenses dated in `month`, newest first
    pub fn list_for_month(&self, month: MonthYear) -> FiscalResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses.get_by_month(month)?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    pub fn get(&self, id: &ExpenseId) -> FiscalResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Save the expense form in either mode
    pub fn submit(&self, mode: FormMode<ExpenseId>, draft: ExpenseDraft) -> FiscalResult<Expense> {
        let (category_id, amount, date) = match (draft.category_id, draft.amount, draft.date) {
            (Some(category_id), Some(amount), Some(date)) if amount.is_positive() => {
                (category_id, amount, date)
            }
            _ => {
                return Err(FiscalError::Validation(
                    "Amount greater than zero, category and date are required".into(),
                ))
            }
        };

        let category = self
            .storage
            .categories
            .get(&category_id)?
            .ok_or_else(|| FiscalError::category_not_found(category_id.as_str()))?;

        let notes = draft
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let items = (category.is_grocery() && !draft.items.is_empty()).then_some(draft.items);

        let before = match &mode {
            FormMode::Creating => None,
            FormMode::Editing(id) => Some(
                self.storage
                    .expenses
                    .get(id)?
                    .ok_or_else(|| FiscalError::expense_not_found(id.as_str()))?,
            ),
        };

        let mut expense = Expense::new(category_id, amount, date);
        if let Some(before) = &before {
            expense.id = before.id.clone();
        }
        expense.notes = notes;
        expense.items = items;
        expense
            .validate()
            .map_err(|e| FiscalError::Validation(e.to_string()))?;

        self.storage.expenses.upsert_and_save(expense.clone())?;

        let label = Some(format!("{} in {}", expense.amount, category.name));
        match before {
            None => {
                tracing::info!(id = %expense.id, amount = %expense.amount, "expense created");
                self.storage
                    .log_create(EntityType::Expense, expense.id.to_string(), label, &expense);
            }
            Some(before) => {
                tracing::info!(id = %expense.id, "expense updated");
                self.storage.log_update(
                    EntityType::Expense,
                    expense.id.to_string(),
                    label,
                    &before,
                    &expense,
                );
            }
        }

        Ok(expense)
    }

    pub fn create(&self, draft: ExpenseDraft) -> FiscalResult<Expense> {
        self.submit(FormMode::Creating, draft)
    }

    /// Delete by id; a missing id is a no-op
    pub fn delete(&self, id: &ExpenseId) -> FiscalResult<Option<Expense>> {
        let removed = self.storage.expenses.delete_and_save(id)?;

        if let Some(expense) = &removed {
            tracing::info!(id = %expense.id, "expense deleted");
            self.storage.log_delete(
                EntityType::Expense,
                expense.id.to_string(),
                Some(expense.amount.to_string()),
                expense,
            );
        }
        Ok(removed)
    }
}
