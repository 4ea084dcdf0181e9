//! Expense repository

use crate::error::FiscalResult;
use crate::models::{CategoryId, Expense, Money, MonthYear};

use super::collection::Collection;

pub type ExpenseRepository = Collection<Expense>;

impl Collection<Expense> {
    /// Every expense, newest first
    pub fn get_all_by_date_desc(&self) -> FiscalResult<Vec<Expense>> {
        let mut expenses = self.get_all()?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    /// Expenses whose stored date string starts with the month
    pub fn get_by_month(&self, month: MonthYear) -> FiscalResult<Vec<Expense>> {
        self.filter(|e| month.matches_date_str(e.date_string()))
    }

    pub fn get_by_category(&self, category_id: &CategoryId) -> FiscalResult<Vec<Expense>> {
        self.filter(|e| &e.category_id == category_id)
    }

    /// Total spent in one category during one month
    pub fn spent_in(&self, category_id: &CategoryId, month: MonthYear) -> FiscalResult<Money> {
        Ok(self
            .filter(|e| &e.category_id == category_id && month.matches_date_str(e.date_string()))?
            .iter()
            .map(|e| e.amount)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::{JsonFileStore, MemoryStore};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn expense(category: &str, cents: i64, y: i32, m: u32, d: u32) -> Expense {
        Expense::new(
            CategoryId::from_raw(category),
            Money::from_cents(cents),
            Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
        )
    }

    fn repo_with(expenses: Vec<Expense>) -> ExpenseRepository {
        let repo = ExpenseRepository::new(Box::new(MemoryStore::new("expenses")));
        for e in expenses {
            repo.upsert(e).unwrap();
        }
        repo
    }

    #[test]
    fn test_spent_sums_matching_category_and_month() {
        let repo = repo_with(vec![
            expense("cat_grocery", 1_250, 2024, 5, 1),
            expense("cat_grocery", 750, 2024, 5, 31),
            expense("cat_grocery", 9_999, 2024, 6, 1),
            expense("cat_rent", 120_000, 2024, 5, 2),
        ]);

        let may: MonthYear = "2024-05".parse().unwrap();
        let spent = repo.spent_in(&CategoryId::from_raw("cat_grocery"), may).unwrap();
        assert_eq!(spent, Money::from_cents(2_000));

        let none = repo.spent_in(&CategoryId::from_raw("cat_health"), may).unwrap();
        assert_eq!(none, Money::zero());
    }

    #[test]
    fn test_newest_first() {
        let repo = repo_with(vec![
            expense("cat_other", 100, 2024, 1, 1),
            expense("cat_other", 200, 2024, 3, 1),
            expense("cat_other", 300, 2024, 2, 1),
        ]);

        let amounts: Vec<i64> = repo
            .get_all_by_date_desc()
            .unwrap()
            .iter()
            .map(|e| e.amount.cents())
            .collect();
        assert_eq!(amounts, [200, 300, 100]);
    }

    #[test]
    fn test_by_month() {
        let repo = repo_with(vec![
            expense("cat_other", 100, 2024, 1, 31),
            expense("cat_other", 200, 2024, 2, 1),
        ]);
        let feb: MonthYear = "2024-02".parse().unwrap();
        assert_eq!(repo.get_by_month(feb).unwrap().len(), 1);
    }

    #[test]
    fn test_stored_date_text_survives_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        std::fs::write(
            &path,
            r#"[
                {"id":"exp_1","categoryId":"cat_grocery","amount":10.0,"date":"2024-06-01T01:00:00+02:00"},
                {"id":"exp_2","categoryId":"cat_grocery","amount":2.5,"date":"2024-05-03T10:00:00Z"}
            ]"#,
        )
        .unwrap();

        let repo = ExpenseRepository::new(Box::new(JsonFileStore::new("expenses", path.clone())));
        repo.load().unwrap();

        let grocery = CategoryId::from_raw("cat_grocery");
        let june: MonthYear = "2024-06".parse().unwrap();
        let may: MonthYear = "2024-05".parse().unwrap();
        assert_eq!(repo.spent_in(&grocery, june).unwrap(), Money::from_cents(1_000));
        assert_eq!(repo.spent_in(&grocery, may).unwrap(), Money::from_cents(250));

        repo.save().unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written[0]["date"], "2024-06-01T01:00:00+02:00");
        assert_eq!(written[1]["date"], "2024-05-03T10:00:00Z");

        let reopened = ExpenseRepository::new(Box::new(JsonFileStore::new("expenses", path)));
        reopened.load().unwrap();
        assert_eq!(reopened.get_all().unwrap(), repo.get_all().unwrap());
    }

    #[test]
    fn test_spent_never_overflows() {
        let half = i64::MAX / 2 + 1;
        let repo = repo_with(vec![
            expense("cat_grocery", half, 2024, 6, 1),
            expense("cat_grocery", half, 2024, 6, 2),
        ]);
        let june: MonthYear = "2024-06".parse().unwrap();
        let spent = repo.spent_in(&CategoryId::from_raw("cat_grocery"), june).unwrap();
        assert_eq!(spent.cents(), i64::MAX);
    }

    #[test]
    fn test_out_of_range_stored_amount_is_a_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        std::fs::write(
            &path,
            r#"[{"id":"exp_1","categoryId":"cat_grocery","amount":50000000000000000.0,"date":"2024-06-01T00:00:00Z"}]"#,
        )
        .unwrap();

        let repo = ExpenseRepository::new(Box::new(JsonFileStore::new("expenses", path)));
        assert!(repo.load().is_err());
    }
}
