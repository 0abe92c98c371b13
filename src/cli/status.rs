use colored::Colorize;

use crate::db::open_default;
use crate::error::Result;
use crate::fmt::money;
use crate::models::Month;
use crate::reports::monthly_overview;
use crate::settings::{load_settings, DB_FILE};
use crate::store;

pub fn run(month: Option<&str>) -> Result<()> {
    let month = Month::from_opt(month)?;
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let symbol = &settings.currency_symbol;

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", data_dir.join(DB_FILE).display());

    let conn = open_default()?;
    let income = store::month_income(&conn, month)?;
    let expenses = store::month_expenses(&conn, month)?;
    let overview = monthly_overview(income, &expenses);

    let remaining = money(overview.remaining, symbol);
    let remaining = if overview.remaining < 0.0 {
        remaining.red().bold()
    } else {
        remaining.green().bold()
    };

    println!();
    println!("Month:             {month}");
    println!("Total Income:      {}", money(overview.income, symbol));
    println!("Total Expenses:    {}", money(overview.total_expenses, symbol));
    println!("Remaining Balance: {remaining}");
    Ok(())
}
