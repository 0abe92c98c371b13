use comfy_table::{Cell, Table};

use crate::db::open_default;
use crate::error::Result;
use crate::fmt::{money, pct};
use crate::models::Category;
use crate::settings::load_settings;
use crate::store;

pub fn set(category: Category, amount: f64, percentage: f64) -> Result<()> {
    let conn = open_default()?;
    store::set_limit(&conn, category, amount, percentage)?;
    let symbol = load_settings().currency_symbol;
    println!("Limit set for {category}: {}", money(amount, &symbol));
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = open_default()?;
    let limits = store::get_limits(&conn)?;
    let symbol = load_settings().currency_symbol;

    let mut table = Table::new();
    table.set_header(vec!["Category", "Monthly Limit", "% of Income"]);
    for limit in &limits {
        table.add_row(vec![
            Cell::new(&limit.category),
            Cell::new(money(limit.limit_amount, &symbol)),
            Cell::new(pct(limit.limit_percentage)),
        ]);
    }
    println!("Expense Limits\n{table}");
    Ok(())
}
