//! Error types raised while constructing calendar widgets and cells.

use thiserror::Error;

/// Errors surfaced synchronously at construction time.
///
/// Rendering and navigation never fail once a widget exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type alias for widget operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
