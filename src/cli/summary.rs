use colored::{ColoredString, Colorize};
use comfy_table::{Cell, Table};

use crate::db::open_default;
use crate::error::Result;
use crate::fmt::{money, pct};
use crate::models::Month;
use crate::reports::{expense_distribution, Distribution};
use crate::settings::load_settings;
use crate::store;

const CHART_WIDTH: usize = 40;

const PALETTE: &[(u8, u8, u8)] = &[
    (0x4e, 0x73, 0xdf),
    (0xff, 0x6b, 0x6b),
    (0x98, 0xc4, 0xab),
    (0xa5, 0xc4, 0x9f),
    (0xf6, 0xc2, 0x3e),
];

fn bar_len(share_pct: f64, width: usize) -> usize {
    let filled = (share_pct / 100.0 * width as f64).round();
    (filled.max(0.0) as usize).min(width)
}

fn bar(index: usize, len: usize) -> ColoredString {
    let (r, g, b) = PALETTE[index % PALETTE.len()];
    "█".repeat(len).truecolor(r, g, b)
}

fn render_chart(dist: &Distribution) -> String {
    let label_width = dist.items.iter().map(|i| i.category.len()).max().unwrap_or(0);
    dist.items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let len = bar_len(item.pct, CHART_WIDTH);
            format!(
                "{:<label_width$}  {}{}  {:>6}",
                item.category,
                bar(idx, len),
                " ".repeat(CHART_WIDTH - len),
                pct(item.pct),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn run(month: Option<&str>) -> Result<()> {
    let month = Month::from_opt(month)?;
    let conn = open_default()?;
    let expenses = store::month_expenses(&conn, month)?;
    let symbol = load_settings().currency_symbol;

    if expenses.is_empty() {
        println!("No expenses recorded for {month}.");
        return Ok(());
    }

    let dist = expense_distribution(&expenses);

    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "%"]);
    for item in &dist.items {
        table.add_row(vec![
            Cell::new(&item.category),
            Cell::new(money(item.total, &symbol)),
            Cell::new(pct(item.pct)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(money(dist.total, &symbol)),
        Cell::new(""),
    ]);
    println!("Expense Summary — {month}\n{table}");

    println!("\n{}", "Expense Distribution".bold());
    println!("{}", render_chart(&dist));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_len() {
        assert_eq!(bar_len(0.0, 40), 0);
        assert_eq!(bar_len(50.0, 40), 20);
        assert_eq!(bar_len(100.0, 40), 40);
        assert_eq!(bar_len(1.0, 40), 0);
        assert_eq!(bar_len(130.0, 40), 40);
    }

    #[test]
    fn test_render_chart_one_row_per_category() {
        colored::control::set_override(false);
        let dist = expense_distribution(&[("Food", 250.0), ("Rent", 750.0)]);
        let chart = render_chart(&dist);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Food"));
        assert!(lines[0].ends_with("25.0%"));
        assert_eq!(lines[1].matches('█').count(), 30);
    }
}
