use std::collections::BTreeMap;

use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::debug;

use crate::error::{FinanceError, Result};
use crate::models::{Category, ExpenseEntry, ExpenseLimit, IncomeEntry, Month};

fn check_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(FinanceError::InvalidAmount(amount));
    }
    Ok(())
}

fn date_str(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

pub fn save_income(conn: &Connection, amount: f64, date: NaiveDate) -> Result<i64> {
    check_amount(amount)?;
    conn.execute(
        "INSERT INTO income (amount, date) VALUES (?1, ?2)",
        rusqlite::params![amount, date_str(date)],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, amount, %date, "saved income");
    Ok(id)
}

pub fn save_expense(conn: &Connection, category: Category, amount: f64, date: NaiveDate) -> Result<i64> {
    check_amount(amount)?;
    conn.execute(
        "INSERT INTO expenses (category, amount, date) VALUES (?1, ?2, ?3)",
        rusqlite::params![category.as_str(), amount, date_str(date)],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, %category, amount, %date, "saved expense");
    Ok(id)
}

/// Insert or replace the limit for a category.
pub fn set_limit(conn: &Connection, category: Category, limit_amount: f64, limit_percentage: f64) -> Result<()> {
    check_amount(limit_amount)?;
    if !(0.0..=100.0).contains(&limit_percentage) {
        return Err(FinanceError::InvalidPercentage(limit_percentage));
    }
    conn.execute(
        "INSERT INTO expense_limits (category, limit_amount, limit_percentage) VALUES (?1, ?2, ?3) \
         ON CONFLICT(category) DO UPDATE SET \
         limit_amount = excluded.limit_amount, limit_percentage = excluded.limit_percentage",
        rusqlite::params![category.as_str(), limit_amount, limit_percentage],
    )?;
    debug!(%category, limit_amount, limit_percentage, "set limit");
    Ok(())
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Total income recorded in the month. Several entries in one month are summed.
pub fn month_income(conn: &Connection, month: Month) -> Result<f64> {
    let total: f64 = conn.query_row(
        "SELECT COALESCE(SUM(amount), 0.0) FROM income WHERE date LIKE ?1",
        [month.like_pattern()],
        |row| row.get(0),
    )?;
    Ok(total)
}

/// (category, amount) for every expense in the month, in insertion order.
pub fn month_expenses(conn: &Connection, month: Month) -> Result<Vec<(String, f64)>> {
    let mut stmt = conn.prepare("SELECT category, amount FROM expenses WHERE date LIKE ?1 ORDER BY id")?;
    let rows = stmt
        .query_map([month.like_pattern()], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    debug!(%month, count = rows.len(), "loaded expenses");
    Ok(rows)
}

pub fn get_limits(conn: &Connection) -> Result<Vec<ExpenseLimit>> {
    let mut stmt = conn.prepare(
        "SELECT category, limit_amount, limit_percentage FROM expense_limits ORDER BY category",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(ExpenseLimit {
                category: row.get(0)?,
                limit_amount: row.get(1)?,
                limit_percentage: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn limit_map(limits: &[ExpenseLimit]) -> BTreeMap<String, f64> {
    limits
        .iter()
        .map(|l| (l.category.clone(), l.limit_amount))
        .collect()
}

pub fn list_income(conn: &Connection, month: Month) -> Result<Vec<IncomeEntry>> {
    let mut stmt = conn.prepare("SELECT id, amount, date FROM income WHERE date LIKE ?1 ORDER BY date, id")?;
    let rows = stmt
        .query_map([month.like_pattern()], |row| {
            Ok(IncomeEntry {
                id: row.get(0)?,
                amount: row.get(1)?,
                date: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn list_expenses(conn: &Connection, month: Month) -> Result<Vec<ExpenseEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, category, amount, date FROM expenses WHERE date LIKE ?1 ORDER BY date, id",
    )?;
    let rows = stmt
        .query_map([month.like_pattern()], |row| {
            Ok(ExpenseEntry {
                id: row.get(0)?,
                category: row.get(1)?,
                amount: row.get(2)?,
                date: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn jan() -> Month {
        Month { year: 2025, month: 1 }
    }

    #[test]
    fn test_month_income_is_zero_without_entries() {
        let (_dir, conn) = test_db();
        assert_eq!(month_income(&conn, jan()).unwrap(), 0.0);
    }

    #[test]
    fn test_month_income_single_entry() {
        let (_dir, conn) = test_db();
        save_income(&conn, 50000.0, d("2025-01-01")).unwrap();
        assert_eq!(month_income(&conn, jan()).unwrap(), 50000.0);
    }

    #[test]
    fn test_month_income_sums_multiple_entries() {
        let (_dir, conn) = test_db();
        save_income(&conn, 40000.0, d("2025-01-01")).unwrap();
        save_income(&conn, 2500.5, d("2025-01-20")).unwrap();
        save_income(&conn, 99999.0, d("2025-02-01")).unwrap();
        save_income(&conn, 11111.0, d("2024-01-15")).unwrap();
        assert_eq!(month_income(&conn, jan()).unwrap(), 42500.5);
    }

    #[test]
    fn test_save_income_rejects_negative() {
        let (_dir, conn) = test_db();
        let err = save_income(&conn, -1.0, d("2025-01-01")).unwrap_err();
        assert!(matches!(err, FinanceError::InvalidAmount(_)));
        assert!(save_income(&conn, f64::NAN, d("2025-01-01")).is_err());
    }

    #[test]
    fn test_month_expenses_filters_by_month() {
        let (_dir, conn) = test_db();
        save_expense(&conn, Category::Food, 120.0, d("2025-01-03")).unwrap();
        save_expense(&conn, Category::Rent, 900.0, d("2025-01-01")).unwrap();
        save_expense(&conn, Category::Food, 80.0, d("2025-02-01")).unwrap();
        let rows = month_expenses(&conn, jan()).unwrap();
        assert_eq!(rows, vec![("Food".to_string(), 120.0), ("Rent".to_string(), 900.0)]);
    }

    #[test]
    fn test_save_expense_rejects_negative() {
        let (_dir, conn) = test_db();
        assert!(save_expense(&conn, Category::Bills, -5.0, d("2025-01-01")).is_err());
        assert!(month_expenses(&conn, jan()).unwrap().is_empty());
    }

    #[test]
    fn test_set_limit_upserts_by_category() {
        let (_dir, conn) = test_db();
        set_limit(&conn, Category::Food, 15000.0, 30.0).unwrap();
        set_limit(&conn, Category::Rent, 20000.0, 0.0).unwrap();
        set_limit(&conn, Category::Food, 12000.0, 25.0).unwrap();
        let limits = get_limits(&conn).unwrap();
        assert_eq!(limits.len(), 2);
        assert_eq!(limits[0].category, "Food");
        assert_eq!(limits[0].limit_amount, 12000.0);
        assert_eq!(limits[0].limit_percentage, 25.0);
        assert_eq!(limits[1].category, "Rent");
    }

    #[test]
    fn test_set_limit_validates_percentage() {
        let (_dir, conn) = test_db();
        let err = set_limit(&conn, Category::Food, 100.0, 101.0).unwrap_err();
        assert!(matches!(err, FinanceError::InvalidPercentage(p) if p == 101.0));
        assert!(set_limit(&conn, Category::Food, 100.0, -1.0).is_err());
        assert!(set_limit(&conn, Category::Food, -100.0, 10.0).is_err());
        assert!(get_limits(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_limit_map() {
        let (_dir, conn) = test_db();
        set_limit(&conn, Category::Bills, 300.0, 0.0).unwrap();
        let map = limit_map(&get_limits(&conn).unwrap());
        assert_eq!(map.get("Bills"), Some(&300.0));
        assert_eq!(map.get("Food"), None);
    }

    #[test]
    fn test_list_entries_ordered_by_date() {
        let (_dir, conn) = test_db();
        save_income(&conn, 10.0, d("2025-01-20")).unwrap();
        save_income(&conn, 20.0, d("2025-01-05")).unwrap();
        save_expense(&conn, Category::Other, 1.0, d("2025-01-31")).unwrap();
        save_expense(&conn, Category::Entertainment, 2.0, d("2025-01-02")).unwrap();

        let income = list_income(&conn, jan()).unwrap();
        assert_eq!(income.iter().map(|i| i.amount).collect::<Vec<_>>(), vec![20.0, 10.0]);
        assert_eq!(income[0].date, "2025-01-05");

        let expenses = list_expenses(&conn, jan()).unwrap();
        assert_eq!(expenses[0].category, "Entertainment");
        assert_eq!(expenses[1].date, "2025-01-31");
    }
}
