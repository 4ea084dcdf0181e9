//! Category model
//!
//! Categories group expenses and carry a display icon. Budgets and expenses
//! point at a category by id; nothing enforces that the category still exists.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::icon::CategoryIcon;
use super::ids::CategoryId;

/// Name of the category that receipt scans are filed under
pub const GROCERY_CATEGORY_NAME: &str = "Grocery";

/// A spending category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub icon: CategoryIcon,
}

impl Category {
    /// Create a new category with a fresh id
    pub fn new(name: impl Into<String>, icon: CategoryIcon) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            icon,
        }
    }

    /// Whether itemized grocery lists may be attached to expenses in this category
    pub fn is_grocery(&self) -> bool {
        self.name.trim().eq_ignore_ascii_case(GROCERY_CATEGORY_NAME)
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.chars().count() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Categories seeded on first load: (id, name, icon)
const DEFAULTS: &[(&str, &str, CategoryIcon)] = &[
    ("cat_grocery", GROCERY_CATEGORY_NAME, CategoryIcon::ShoppingCart),
    ("cat_transport", "Transport", CategoryIcon::Car),
    ("cat_utilities", "Utilities", CategoryIcon::Zap),
    ("cat_rent", "Rent/Mortgage", CategoryIcon::Home),
    ("cat_entertainment", "Entertainment", CategoryIcon::Film),
    ("cat_health", "Health", CategoryIcon::HeartPulse),
    ("cat_education", "Education", CategoryIcon::BookOpen),
    ("cat_other", "Other", CategoryIcon::Sparkles),
];

/// The default category set for a fresh install
pub fn default_categories() -> Vec<Category> {
    DEFAULTS
        .iter()
        .map(|(id, name, icon)| Category {
            id: CategoryId::from_raw(*id),
            name: (*name).to_string(),
            icon: *icon,
        })
        .collect()
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Pets", CategoryIcon::Bone);
        assert_eq!(category.name, "Pets");
        assert_eq!(category.icon, CategoryIcon::Bone);
        assert!(category.id.as_str().starts_with("cat_"));
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("Valid", CategoryIcon::Gift);
        assert!(category.validate().is_ok());

        category.name = "   ".into();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));
    }

    #[test]
    fn test_defaults() {
        let defaults = default_categories();
        assert_eq!(defaults.len(), 8);
        assert_eq!(defaults[0].id.as_str(), "cat_grocery");
        assert!(defaults[0].is_grocery());
        assert!(!defaults[1].is_grocery());
        assert_eq!(defaults[7].icon, CategoryIcon::Sparkles);
    }

    #[test]
    fn test_storage_shape() {
        let category = Category {
            id: CategoryId::from_raw("cat_grocery"),
            name: "Grocery".into(),
            icon: CategoryIcon::ShoppingCart,
        };
        let json = serde_json::to_string(&category).unwrap();
        assert_eq!(
            json,
            r#"{"id":"cat_grocery","name":"Grocery","icon":"ShoppingCart"}"#
        );
    }
}
