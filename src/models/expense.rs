//! Expense and grocery item models
//!
//! An expense is a single spending event. Grocery expenses may carry an
//! itemized list; the list is display data and never recomputes `amount`.

use chrono::format::{DelayedFormat, StrftimeItems};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

use super::ids::{CategoryId, ExpenseId, ItemId};
use super::money::Money;

/// One line of an itemized receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
}

impl GroceryItem {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            price,
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyItemName);
        }
        if self.price.is_negative() {
            return Err(ExpenseValidationError::NegativeItemPrice(self.name.clone()));
        }
        Ok(())
    }
}

/// A recorded spending event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub category_id: CategoryId,
    pub amount: Money,
    pub date: ExpenseDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<GroceryItem>>,
}

impl Expense {
    pub fn new(category_id: CategoryId, amount: Money, date: impl Into<ExpenseDate>) -> Self {
        Self {
            id: ExpenseId::new(),
            category_id,
            amount,
            date: date.into(),
            notes: None,
            items: None,
        }
    }

    /// The date text exactly as stored
    pub fn date_string(&self) -> &str {
        self.date.as_str()
    }

    /// Sum of itemized prices, if the expense is itemized
    pub fn items_total(&self) -> Option<Money> {
        self.items.as_ref().map(|items| items.iter().map(|i| i.price).sum())
    }

    pub fn item_count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        if self.category_id.as_str().trim().is_empty() {
            return Err(ExpenseValidationError::MissingCategory);
        }
        if let Some(items) = &self.items {
            for item in items {
                item.validate()?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.amount)
    }
}

/// An expense date, kept as the ISO-8601 text it was stored with
///
/// The text is what gets written back and what month matching runs
/// against; the parsed value is used for ordering and display. Dates
/// created here are written as UTC with milliseconds
/// (`2024-05-03T10:00:00.000Z`).
#[derive(Debug, Clone)]
pub struct ExpenseDate {
    text: String,
    parsed: DateTime<FixedOffset>,
}

impl ExpenseDate {
    /// Parse RFC 3339 text, keeping it verbatim
    pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
        let parsed = DateTime::parse_from_rfc3339(text)?;
        Ok(Self {
            text: text.to_string(),
            parsed,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.parsed.with_timezone(&Utc)
    }

    /// Format in the offset the date was written with
    pub fn format<'a>(&self, fmt: &'a str) -> DelayedFormat<StrftimeItems<'a>> {
        self.parsed.format(fmt)
    }
}

impl From<DateTime<Utc>> for ExpenseDate {
    fn from(date: DateTime<Utc>) -> Self {
        Self {
            text: date.to_rfc3339_opts(SecondsFormat::Millis, true),
            parsed: date.into(),
        }
    }
}

impl PartialEq for ExpenseDate {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ExpenseDate {}

impl PartialOrd for ExpenseDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExpenseDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parsed
            .cmp(&other.parsed)
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for ExpenseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for ExpenseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ExpenseDate::parse(&s).map_err(|e| de::Error::custom(format!("invalid date '{}': {}", s, e)))
    }
}

/// Validation errors for expenses and their items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount,
    MissingCategory,
    EmptyItemName,
    NegativeItemPrice(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Expense amount must be greater than zero"),
            Self::MissingCategory => write!(f, "Expense category is required"),
            Self::EmptyItemName => write!(f, "Item name cannot be empty"),
            Self::NegativeItemPrice(name) => {
                write!(f, "Price of '{}' cannot be negative", name)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn may_third() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 3, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_date_string_format() {
        let expense = Expense::new(CategoryId::from_raw("cat_grocery"), Money::from_cents(570), may_third());
        assert_eq!(expense.date_string(), "2024-05-03T10:00:00.000Z");
    }

    #[test]
    fn test_storage_shape() {
        let mut expense = Expense::new(CategoryId::from_raw("cat_grocery"), Money::from_cents(570), may_third());
        expense.id = ExpenseId::from_raw("exp_1");
        let json = serde_json::to_value(&expense).unwrap();

        assert_eq!(json["categoryId"], "cat_grocery");
        assert_eq!(json["amount"], 5.7);
        assert_eq!(json["date"], "2024-05-03T10:00:00.000Z");
        assert!(json.get("notes").is_none());
        assert!(json.get("items").is_none());
    }

    #[test]
    fn test_reads_browser_style_record() {
        let raw = r#"{
            "id": "exp_1715000000000",
            "categoryId": "cat_grocery",
            "amount": 5.7,
            "date": "2024-05-03T10:00:00.000Z",
            "notes": "weekly shop",
            "items": [
                {"id": "ocr_item_0_1", "name": "Milk", "price": 2.5},
                {"id": "ocr_item_1_1", "name": "Bread", "price": 3.2}
            ]
        }"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.amount.cents(), 570);
        assert_eq!(expense.date.to_utc(), may_third());
        assert_eq!(expense.item_count(), 2);
        assert_eq!(expense.items_total(), Some(Money::from_cents(570)));
    }

    #[test]
    fn test_offset_date_text_is_kept() {
        let raw = r#"{"id":"exp_1","categoryId":"cat_grocery","amount":10.0,"date":"2024-06-01T01:00:00+02:00"}"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();

        assert_eq!(expense.date_string(), "2024-06-01T01:00:00+02:00");
        assert_eq!(expense.date.format("%Y-%m-%d").to_string(), "2024-06-01");
        assert_eq!(expense.date.to_utc(), Utc.with_ymd_and_hms(2024, 5, 31, 23, 0, 0).unwrap());

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["date"], "2024-06-01T01:00:00+02:00");
    }

    #[test]
    fn test_date_ordering_uses_instant() {
        let early = ExpenseDate::parse("2024-06-01T01:00:00+02:00").unwrap();
        let late = ExpenseDate::parse("2024-05-31T23:30:00Z").unwrap();
        assert!(early < late);
        assert!(ExpenseDate::parse("May 3").is_err());
    }

    #[test]
    fn test_validation() {
        let mut expense = Expense::new(CategoryId::from_raw("cat_other"), Money::zero(), may_third());
        assert_eq!(expense.validate(), Err(ExpenseValidationError::NonPositiveAmount));

        expense.amount = Money::from_cents(100);
        assert!(expense.validate().is_ok());

        expense.items = Some(vec![GroceryItem::new("", Money::from_cents(10))]);
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyItemName));

        expense.items = Some(vec![GroceryItem::new("Eggs", Money::from_cents(-1))]);
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::NegativeItemPrice(_))
        ));
    }

    #[test]
    fn test_zero_priced_item_is_valid() {
        let item = GroceryItem::new("Bag", Money::zero());
        assert!(item.validate().is_ok());
    }
}
