//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]` so parse failures bubble up unchanged.

use thiserror::Error;

/// Errors produced while parsing or validating core types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown time period {0:?}: expected morning, afternoon, evening or night")]
    UnknownTimePeriod(String),

    #[error("unknown transport mode {0:?}: expected car, bus, metro or emergency")]
    UnknownMode(String),

    #[error("unknown road category {0:?}")]
    UnknownCategory(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ct-core`.
pub type CoreResult<T> = Result<T, CoreError>;
