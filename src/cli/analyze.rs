use colored::Colorize;
use rusqlite::Connection;

use crate::db::open_default;
use crate::error::Result;
use crate::models::Month;
use crate::reports::analyze_finances;
use crate::settings::load_settings;
use crate::store;

/// Load a month's income, expenses and limits and render the analysis text.
pub(crate) fn month_report(conn: &Connection, month: Month, symbol: &str) -> Result<String> {
    let income = store::month_income(conn, month)?;
    let expenses = store::month_expenses(conn, month)?;
    let limits = store::limit_map(&store::get_limits(conn)?);
    Ok(analyze_finances(income, &expenses, &limits, symbol))
}

pub fn run(month: Option<&str>) -> Result<()> {
    let month = Month::from_opt(month)?;
    let conn = open_default()?;
    let symbol = load_settings().currency_symbol;
    let report = month_report(&conn, month, &symbol)?;

    println!("{}", format!("Financial Analysis — {month}").bold());
    println!();
    println!("{report}");
    Ok(())
}
