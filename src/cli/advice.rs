use colored::Colorize;

use crate::advisor::{self, build_prompt, AdviceRequest, SUGGESTED_QUESTIONS};
use crate::cli::analyze::month_report;
use crate::db::open_default;
use crate::error::Result;
use crate::models::Month;
use crate::settings::load_settings;

const WRAP_WIDTH: usize = 80;

pub fn run(question: Option<&str>, quick: Option<usize>, month: Option<&str>) -> Result<()> {
    let request = AdviceRequest::resolve(question, quick)?;
    let month = Month::from_opt(month)?;
    let settings = load_settings();

    let conn = open_default()?;
    let report = month_report(&conn, month, &settings.currency_symbol)?;
    drop(conn);

    let prompt = build_prompt(&report, &request.question);
    eprintln!("{}", "Generating advice...".dimmed());
    let response = advisor::get_advice(&settings, &prompt);

    println!("{} {}", "You:".cyan().bold(), request.question);
    println!("{}", "Advisor:".green().bold());
    println!("{}", textwrap::fill(response.trim(), WRAP_WIDTH));
    Ok(())
}

pub fn questions() -> Result<()> {
    println!("Suggested questions (use with `fintrack advice --quick N`):");
    for (i, q) in SUGGESTED_QUESTIONS.iter().enumerate() {
        println!("  {}. {q}", i + 1);
    }
    Ok(())
}
