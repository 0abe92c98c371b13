use comfy_table::{Cell, Table};
use colored::Colorize;

use crate::db::open_default;
use crate::error::Result;
use crate::fmt::money;
use crate::models::{date_or_today, Category, Month};
use crate::settings::load_settings;
use crate::store;

pub fn add(category: Category, amount: f64, date: Option<&str>) -> Result<()> {
    let date = date_or_today(date)?;
    let conn = open_default()?;
    store::save_expense(&conn, category, amount, date)?;
    let symbol = load_settings().currency_symbol;
    println!(
        "{} {category} {} on {date}",
        "Expense saved:".green(),
        money(amount, &symbol)
    );
    Ok(())
}

pub fn list(month: Option<&str>) -> Result<()> {
    let month = Month::from_opt(month)?;
    let conn = open_default()?;
    let rows = store::list_expenses(&conn, month)?;
    let symbol = load_settings().currency_symbol;

    if rows.is_empty() {
        println!("No expenses recorded for {month}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Category", "Amount"]);
    let mut total = 0.0;
    for row in &rows {
        total += row.amount;
        table.add_row(vec![
            Cell::new(row.id),
            Cell::new(&row.date),
            Cell::new(&row.category),
            Cell::new(money(row.amount, &symbol)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(""),
        Cell::new(money(total, &symbol)),
    ]);
    println!("Expenses — {month}\n{table}");
    Ok(())
}
