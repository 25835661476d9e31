pub mod board;
pub mod rates;
pub mod ui;

use crate::core::rates::RateStore;
use crate::core::refresh::RefreshOutcome;

/// One-line status for the outcome of a refresh attempt.
pub fn refresh_notice(outcome: &RefreshOutcome) -> String {
    match outcome {
        RefreshOutcome::Updated { source } => {
            ui::style_text(&format!("Rates updated from {source}"), ui::StyleType::Subtle)
        }
        RefreshOutcome::UsingCachedData { error } => ui::style_text(
            &format!("Could not refresh rates, using cached data ({error})"),
            ui::StyleType::Notice,
        ),
        RefreshOutcome::AlreadyFetching => ui::style_text(
            "A refresh is already in progress",
            ui::StyleType::Subtle,
        ),
    }
}

/// Footer naming the active source and its age.
pub fn source_line(rates: &RateStore) -> String {
    ui::style_text(
        &format!(
            "Source: {} · updated {}",
            rates.source(),
            rates.last_updated().format("%Y-%m-%d %H:%M UTC")
        ),
        ui::StyleType::Subtle,
    )
}
