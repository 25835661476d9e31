pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::ui;
use crate::core::board::{AddRowOutcome, MAX_ROWS, RowBoard};
use crate::core::catalog;
use crate::core::config::AppConfig;
use crate::core::rates::RateStore;
use crate::core::refresh::RateCoordinator;
use crate::core::source::RateSource;
use crate::providers::frankfurter::FrankfurterSource;
use crate::providers::open_er::OpenErApiSource;
use crate::providers::relay::RelaySource;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    /// Show the conversion board; `rows` holds CODE or CODE=AMOUNT entries.
    Board { rows: Vec<String> },
    /// Show the rate table for every known currency.
    Rates,
    /// Fetch fresh rates and report the outcome only.
    Refresh,
    /// One-off conversion of an amount to USD.
    Convert { amount: f64, code: String },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxboard starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let data_path = config.default_data_path()?;
    let snapshot_store = store::open_or_memory(&data_path);
    let mut rates = RateStore::new(snapshot_store);

    if !rates.load() {
        debug!("no cached rates");
    }
    if rates.is_empty() {
        rates.seed_fallback(catalog::codes());
    }

    let sources = build_sources(&config);
    let mut coordinator = RateCoordinator::new();

    let spinner = ui::new_spinner("Fetching latest exchange rates...");
    let outcome = coordinator.refresh(&mut rates, &sources).await;
    spinner.finish_and_clear();
    println!("{}", cli::refresh_notice(&outcome));

    match command {
        AppCommand::Refresh => {}
        AppCommand::Rates => println!("{}", cli::rates::render(&rates)),
        AppCommand::Convert { amount, code } => print_conversion(&rates, amount, &code),
        AppCommand::Board { rows } => {
            let board = build_board(&rows);
            println!("{}", cli::board::render(&board, &rates));
        }
    }

    Ok(())
}

fn build_sources(config: &AppConfig) -> Vec<Arc<dyn RateSource>> {
    let providers = &config.providers;

    let open_er_base = providers
        .open_er_api
        .as_ref()
        .map_or("https://open.er-api.com", |p| &p.base_url);
    let relay_base = providers
        .relay
        .as_ref()
        .map_or("https://api.allorigins.win", |p| &p.base_url);
    let relay_target = providers
        .relay
        .as_ref()
        .map_or("https://api.exchangerate-api.com/v4/latest/USD", |p| {
            &p.target_url
        });
    let frankfurter_base = providers
        .frankfurter
        .as_ref()
        .map_or("https://api.frankfurter.dev", |p| &p.base_url);

    vec![
        Arc::new(OpenErApiSource::new(open_er_base)),
        Arc::new(RelaySource::new(relay_base, relay_target)),
        Arc::new(FrankfurterSource::new(frankfurter_base)),
    ]
}

/// Builds the board from user row arguments, then tops it up with the default
/// currencies. Declines and coercions are surfaced as notices.
fn build_board(rows: &[String]) -> RowBoard {
    let mut board = RowBoard::new();
    for entry in rows {
        let (code, amount) = parse_row_arg(entry);
        match board.add_row(Some(code.as_str())) {
            AddRowOutcome::Added { id, coerced_from } => {
                if let Some(requested) = coerced_from {
                    println!(
                        "{}",
                        ui::style_text(
                            &format!(
                                "{requested} is not a configured currency, using {}",
                                catalog::DEFAULT_CODE
                            ),
                            ui::StyleType::Notice
                        )
                    );
                }
                board.set_amount(id, amount);
            }
            AddRowOutcome::Declined => {
                println!(
                    "{}",
                    ui::style_text(
                        &format!("Row limit of {MAX_ROWS} reached, skipping {entry}"),
                        ui::StyleType::Notice
                    )
                );
            }
        }
    }
    board.ensure_default_rows();
    board
}

/// Splits a CODE or CODE=AMOUNT argument. Empty, non-numeric and negative
/// amounts convert as zero.
fn parse_row_arg(entry: &str) -> (String, Option<f64>) {
    match entry.split_once('=') {
        Some((code, amount)) => {
            let amount = amount.trim().parse::<f64>().ok().filter(|a| *a >= 0.0);
            (code.trim().to_uppercase(), amount)
        }
        None => (entry.trim().to_uppercase(), None),
    }
}

fn print_conversion(rates: &RateStore, amount: f64, code: &str) {
    let code = code.to_uppercase();
    if !catalog::is_known(&code) {
        println!(
            "{}",
            ui::style_text(
                &format!("{code} is not a configured currency"),
                ui::StyleType::Error
            )
        );
        return;
    }
    if amount < 0.0 {
        println!(
            "{}",
            ui::style_text("Amount must be non-negative", ui::StyleType::Error)
        );
        return;
    }

    let rate = rates.get(&code);
    println!(
        "{amount:.2} {code} = {:.2} USD (1 USD = {rate:.4} {code})",
        amount / rate
    );
}
