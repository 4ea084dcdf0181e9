//! Strongly-typed ID wrappers for all entity types
//!
//! IDs are stored as plain strings so seeded records (e.g. `cat_grocery`) and
//! records written by older versions load unchanged. New IDs are a type prefix
//! followed by a random v4 UUID, which keeps them unique for the lifetime of
//! the data even after deletions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new unique ID
            pub fn new() -> Self {
                Self(format!("{}{}", $prefix, Uuid::new_v4().simple()))
            }

            /// Wrap an existing identifier
            pub fn from_raw(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Short form for terminal display (prefix + 8 chars)
            pub fn short(&self) -> &str {
                let end = ($prefix.len() + 8).min(self.0.len());
                self.0.get(..end).unwrap_or(&self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

define_id!(CategoryId, "cat_");
define_id!(ExpenseId, "exp_");
define_id!(BudgetId, "bud_");
define_id!(ItemId, "item_");

impl ItemId {
    /// Synthetic id for the `index`-th item of a receipt extraction
    pub fn for_extracted(index: usize) -> Self {
        Self(format!("ocr_item_{}_{}", index, Uuid::new_v4().simple()))
    }
}
