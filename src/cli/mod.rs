pub mod advice;
pub mod analyze;
pub mod expenses;
pub mod income;
pub mod init;
pub mod limits;
pub mod status;
pub mod summary;

use clap::{Parser, Subcommand};

use crate::models::Category;

#[derive(Parser)]
#[command(name = "fintrack", about = "Personal finance tracker: income, expenses, budget limits and advice.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and initialize the database.
    Init {
        /// Path for fintrack data (default: ~/Documents/fintrack)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Record and list income.
    Income {
        #[command(subcommand)]
        command: IncomeCommands,
    },
    /// Record and list expenses.
    Expense {
        #[command(subcommand)]
        command: ExpenseCommands,
    },
    /// Manage per-category monthly spending limits.
    Limit {
        #[command(subcommand)]
        command: LimitCommands,
    },
    /// Print the financial analysis for a month.
    Analyze {
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Expense summary by category with a distribution chart.
    Summary {
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Show income, expenses and remaining balance for a month.
    Status {
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Ask the advisor a question about your finances.
    Advice {
        /// Free-text question
        question: Option<String>,
        /// Use a suggested question by number (see `fintrack questions`)
        #[arg(long)]
        quick: Option<usize>,
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// List the suggested quick questions.
    Questions,
}

#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Save an income entry.
    Add {
        /// Amount received
        amount: f64,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List income entries for a month.
    List {
        #[arg(long)]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Save an expense.
    Add {
        /// Category: food, rent, entertainment, bills, other
        #[arg(value_enum, ignore_case = true)]
        category: Category,
        /// Amount spent
        amount: f64,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List expenses for a month.
    List {
        #[arg(long)]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum LimitCommands {
    /// Set (or replace) the monthly limit for a category.
    Set {
        /// Category: food, rent, entertainment, bills, other
        #[arg(value_enum, ignore_case = true)]
        category: Category,
        /// Monthly limit amount
        amount: f64,
        /// Percentage of income (0-100), stored for reference
        #[arg(long, default_value = "0")]
        percentage: f64,
    },
    /// List all limits.
    List,
}
