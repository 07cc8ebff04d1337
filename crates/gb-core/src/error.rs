//! Workspace error type.
//!
//! The declutter pass itself never fails; errors only come from building a
//! configuration or loading input data.

use thiserror::Error;

/// The top-level error type for `gb-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum GbError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `gb-*` crates.
pub type GbResult<T> = Result<T, GbError>;
