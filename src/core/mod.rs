//! Core rate pipeline and board logic

pub mod board;
pub mod catalog;
pub mod config;
pub mod fallback;
pub mod log;
pub mod rates;
pub mod refresh;
pub mod source;

// Re-export main types for cleaner imports
pub use board::{AddRowOutcome, ConversionRow, MAX_ROWS, RowBoard, RowQuote};
pub use catalog::CurrencyDescriptor;
pub use rates::{RateStore, RateTable};
pub use refresh::{RateCoordinator, RefreshOutcome};
pub use source::RateSource;
