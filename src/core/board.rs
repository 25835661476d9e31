//! Conversion rows and the bounded board that holds them.

use crate::core::catalog::{self, DEFAULT_CODE};
use crate::core::rates::RateStore;
use tracing::warn;

pub const MAX_ROWS: usize = 10;

/// Currencies every fresh board starts with.
pub const DEFAULT_ROW_CODES: &[&str] = &["CNY", "EUR", "JPY", "GBP"];

/// One entry on the board: a currency and an optional entered amount. Derived
/// display values are recomputed from current rate state, never stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRow {
    pub id: u32,
    pub code: String,
    pub amount: Option<f64>,
}

/// Derived display values for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowQuote {
    Quote {
        /// Converted USD amount, 2 decimal places.
        usd_text: String,
        /// Units per USD, 4 decimal places.
        rate_text: String,
        /// USD per unit, 6 decimal places.
        inverse_text: String,
    },
    /// The row references a code outside the catalog.
    NotConfigured,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AddRowOutcome {
    Added {
        id: u32,
        /// Set when the requested code was unknown and the row was created
        /// with the default code instead.
        coerced_from: Option<String>,
    },
    /// The board already holds `MAX_ROWS` rows; nothing was added.
    Declined,
}

#[derive(Default)]
pub struct RowBoard {
    rows: Vec<ConversionRow>,
    next_id: u32,
}

impl RowBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[ConversionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row for `code` (default code when `None` or unknown). Adds
    /// beyond [`MAX_ROWS`] are declined, not truncated.
    pub fn add_row(&mut self, code: Option<&str>) -> AddRowOutcome {
        if self.rows.len() >= MAX_ROWS {
            warn!(limit = MAX_ROWS, "row limit reached, add declined");
            return AddRowOutcome::Declined;
        }

        let (code, coerced_from) = match code {
            Some(c) if catalog::is_known(c) => (c.to_string(), None),
            Some(c) => {
                warn!(code = c, "currency not configured, using {DEFAULT_CODE}");
                (DEFAULT_CODE.to_string(), Some(c.to_string()))
            }
            None => (DEFAULT_CODE.to_string(), None),
        };

        let id = self.next_id;
        self.next_id += 1;
        self.rows.push(ConversionRow {
            id,
            code,
            amount: None,
        });
        AddRowOutcome::Added { id, coerced_from }
    }

    pub fn remove_row(&mut self, id: u32) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() != before
    }

    pub fn set_amount(&mut self, id: u32, amount: Option<f64>) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Adds a row for each default currency that has none yet, without ever
    /// exceeding [`MAX_ROWS`], then guarantees the board is not empty. Runs
    /// once, synchronously, after startup.
    pub fn ensure_default_rows(&mut self) {
        for code in DEFAULT_ROW_CODES {
            if self.rows.len() >= MAX_ROWS {
                break;
            }
            if self.rows.iter().any(|row| row.code == *code) {
                continue;
            }
            self.add_row(Some(*code));
        }
        if self.rows.is_empty() {
            self.add_row(Some(DEFAULT_CODE));
        }
    }

    /// Recomputes every row against current rate state, in board order.
    pub fn recompute_all(&self, rates: &RateStore) -> Vec<RowQuote> {
        self.rows.iter().map(|row| recompute(row, rates)).collect()
    }
}

/// Derives the displayed quote for one row. A missing amount converts as zero;
/// rates are strictly positive by construction, so the divisions are safe.
pub fn recompute(row: &ConversionRow, rates: &RateStore) -> RowQuote {
    if !catalog::is_known(&row.code) {
        return RowQuote::NotConfigured;
    }
    let rate = rates.get(&row.code);
    let amount = row.amount.unwrap_or(0.0);
    RowQuote::Quote {
        usd_text: format!("{:.2}", amount / rate),
        rate_text: format!("{rate:.4}"),
        inverse_text: format!("{:.6}", 1.0 / rate),
    }
}
