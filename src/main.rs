mod advisor;
mod cli;
mod db;
mod error;
mod fmt;
mod logging;
mod models;
mod reports;
mod settings;
mod store;

use clap::Parser;

use cli::{Cli, Commands, ExpenseCommands, IncomeCommands, LimitCommands};

fn main() {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        None => cli::status::run(None),
        Some(command) => match command {
            Commands::Init { data_dir } => cli::init::run(data_dir),
            Commands::Income { command } => match command {
                IncomeCommands::Add { amount, date } => cli::income::add(amount, date.as_deref()),
                IncomeCommands::List { month } => cli::income::list(month.as_deref()),
            },
            Commands::Expense { command } => match command {
                ExpenseCommands::Add {
                    category,
                    amount,
                    date,
                } => cli::expenses::add(category, amount, date.as_deref()),
                ExpenseCommands::List { month } => cli::expenses::list(month.as_deref()),
            },
            Commands::Limit { command } => match command {
                LimitCommands::Set {
                    category,
                    amount,
                    percentage,
                } => cli::limits::set(category, amount, percentage),
                LimitCommands::List => cli::limits::list(),
            },
            Commands::Analyze { month } => cli::analyze::run(month.as_deref()),
            Commands::Summary { month } => cli::summary::run(month.as_deref()),
            Commands::Status { month } => cli::status::run(month.as_deref()),
            Commands::Advice {
                question,
                quick,
                month,
            } => cli::advice::run(question.as_deref(), quick, month.as_deref()),
            Commands::Questions => cli::advice::questions(),
        },
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
