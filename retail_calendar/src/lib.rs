//! # Retail Calendar
//!
//! Small building blocks shared by the demand forecasting crates:
//! COICOP category code normalization and quarterly calendar arithmetic.

use thiserror::Error;

pub mod category;
pub mod quarter;

pub use category::{category_label, parent_of, COICOP_LEGEND};
pub use quarter::{Quarter, QuarterAnchor};

/// Errors that can occur in calendar calculations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Date out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for calendar operations
pub type Result<T> = std::result::Result<T, CalendarError>;
