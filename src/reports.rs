use std::collections::BTreeMap;

use crate::fmt::{money, pct};

pub const NO_EXPENSES: &str = "No expenses recorded for the current month.";

/// Share of income that should be left over after expenses.
pub const SAVINGS_TARGET_PCT: f64 = 30.0;

/// Sum amounts per category, ascending by category name.
fn category_totals<S: AsRef<str>>(expenses: &[(S, f64)]) -> BTreeMap<&str, f64> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for (category, amount) in expenses {
        *totals.entry(category.as_ref()).or_insert(0.0) += amount;
    }
    totals
}

// ---------------------------------------------------------------------------
// Financial analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct OverBudget {
    pub category: String,
    pub spent: f64,
    pub limit: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub income: f64,
    pub total_expenses: f64,
    pub savings: f64,
    pub savings_pct: f64,
    /// Set when savings fall short of the target: how much spending must drop.
    pub reduction_needed: Option<f64>,
    pub over_budget: Vec<OverBudget>,
}

/// Compare a month's spending against income and limits.
///
/// Returns `None` when there are no expenses; nothing else is computed then.
/// Savings percentage is 0 when income is 0 or less.
pub fn analyze<S: AsRef<str>>(
    income: f64,
    expenses: &[(S, f64)],
    limits: &BTreeMap<String, f64>,
) -> Option<Analysis> {
    if expenses.is_empty() {
        return None;
    }

    let total_expenses: f64 = expenses.iter().map(|(_, a)| a).sum();
    let savings = income - total_expenses;
    let savings_pct = if income > 0.0 { savings / income * 100.0 } else { 0.0 };

    let reduction_needed = if savings_pct < SAVINGS_TARGET_PCT {
        let spend_ceiling = income * (1.0 - SAVINGS_TARGET_PCT / 100.0);
        Some(total_expenses - spend_ceiling)
    } else {
        None
    };

    let over_budget = category_totals(expenses)
        .into_iter()
        .filter_map(|(category, spent)| {
            let limit = *limits.get(category)?;
            (spent > limit).then(|| OverBudget {
                category: category.to_string(),
                spent,
                limit,
            })
        })
        .collect();

    Some(Analysis {
        income,
        total_expenses,
        savings,
        savings_pct,
        reduction_needed,
        over_budget,
    })
}

impl Analysis {
    pub fn render(&self, symbol: &str) -> String {
        let mut lines = vec![
            format!("Monthly Income: {}", money(self.income, symbol)),
            format!("Total Expenses: {}", money(self.total_expenses, symbol)),
            format!(
                "Current Savings: {} ({})",
                money(self.savings, symbol),
                pct(self.savings_pct)
            ),
            String::new(),
        ];

        match self.reduction_needed {
            Some(reduction) => {
                lines.push(format!("⚠️ Warning: Savings below {SAVINGS_TARGET_PCT:.0}% target"));
                lines.push(format!(
                    "Reduce expenses by {} to reach {SAVINGS_TARGET_PCT:.0}% savings target",
                    money(reduction, symbol)
                ));
            }
            None => lines.push(format!("✅ Meeting savings target of {SAVINGS_TARGET_PCT:.0}%")),
        }

        for item in &self.over_budget {
            lines.push(String::new());
            lines.push(format!("⚠️ Over budget in {}", item.category));
            lines.push(format!(
                "Spent: {} vs Limit: {}",
                money(item.spent, symbol),
                money(item.limit, symbol)
            ));
        }

        lines.join("\n")
    }
}

/// The textual financial summary for a month.
pub fn analyze_finances<S: AsRef<str>>(
    income: f64,
    expenses: &[(S, f64)],
    limits: &BTreeMap<String, f64>,
    symbol: &str,
) -> String {
    match analyze(income, expenses, limits) {
        Some(analysis) => analysis.render(symbol),
        None => NO_EXPENSES.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Expense distribution
// ---------------------------------------------------------------------------

pub struct DistributionItem {
    pub category: String,
    pub total: f64,
    pub pct: f64,
}

pub struct Distribution {
    pub items: Vec<DistributionItem>,
    pub total: f64,
}

pub fn expense_distribution<S: AsRef<str>>(expenses: &[(S, f64)]) -> Distribution {
    let totals = category_totals(expenses);
    let total: f64 = totals.values().sum();
    let items = totals
        .into_iter()
        .map(|(category, t)| DistributionItem {
            category: category.to_string(),
            total: t,
            pct: if total != 0.0 { t / total * 100.0 } else { 0.0 },
        })
        .collect();
    Distribution { items, total }
}

// ---------------------------------------------------------------------------
// Monthly overview
// ---------------------------------------------------------------------------

pub struct MonthlyOverview {
    pub income: f64,
    pub total_expenses: f64,
    pub remaining: f64,
}

pub fn monthly_overview<S: AsRef<str>>(income: f64, expenses: &[(S, f64)]) -> MonthlyOverview {
    let total_expenses: f64 = expenses.iter().map(|(_, a)| a).sum();
    MonthlyOverview {
        income,
        total_expenses,
        remaining: income - total_expenses,
    }
}
