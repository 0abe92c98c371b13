use comfy_table::{Cell, Table};
use colored::Colorize;

use crate::db::open_default;
use crate::error::Result;
use crate::fmt::money;
use crate::models::{date_or_today, Month};
use crate::settings::load_settings;
use crate::store;

pub fn add(amount: f64, date: Option<&str>) -> Result<()> {
    let date = date_or_today(date)?;
    let conn = open_default()?;
    store::save_income(&conn, amount, date)?;
    let symbol = load_settings().currency_symbol;
    println!("{} {} on {date}", "Income saved:".green(), money(amount, &symbol));
    Ok(())
}

pub fn list(month: Option<&str>) -> Result<()> {
    let month = Month::from_opt(month)?;
    let conn = open_default()?;
    let rows = store::list_income(&conn, month)?;
    let total = store::month_income(&conn, month)?;
    let symbol = load_settings().currency_symbol;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Amount"]);
    for row in &rows {
        table.add_row(vec![
            Cell::new(row.id),
            Cell::new(&row.date),
            Cell::new(money(row.amount, &symbol)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(money(total, &symbol)),
    ]);
    println!("Income — {month}\n{table}");
    Ok(())
}
