use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{FinanceError, Result};

/// Expense classification. The display name is what gets stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum Category {
    Food,
    Rent,
    Entertainment,
    Bills,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar month, used as the `YYYY-MM` prefix filter on stored dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// `LIKE` pattern matching every date in this month.
    pub fn like_pattern(&self) -> String {
        format!("{self}%")
    }

    /// Resolve an optional `--month` flag, defaulting to the current month.
    pub fn from_opt(month: Option<&str>) -> Result<Self> {
        match month {
            Some(m) => m.parse(),
            None => Ok(Self::current()),
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || FinanceError::InvalidMonth(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        let digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(y, 4) || !digits(m, 2) || !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| FinanceError::InvalidDate(s.to_string()))
}

/// Resolve an optional `--date` flag, defaulting to today.
pub fn date_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(d) => parse_date(d),
        None => Ok(Local::now().date_naive()),
    }
}

#[derive(Debug, Clone)]
pub struct IncomeEntry {
    pub id: i64,
    pub amount: f64,
    pub date: String,
}

#[derive(Debug, Clone)]
pub struct ExpenseEntry {
    pub id: i64,
    pub category: String,
    pub amount: f64,
    pub date: String,
}

#[derive(Debug, Clone)]
pub struct ExpenseLimit {
    pub category: String,
    pub limit_amount: f64,
    pub limit_percentage: f64,
}
