//! Error types for the fallible edges of the crate.
//!
//! Selection, focus and structural updates never fail; only parsing input
//! descriptions and validating configuration can.

use thiserror::Error;

/// Errors produced when turning text or terminal events into a key combo.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    /// The input contained no key.
    #[error("Empty key combination")]
    Empty,

    /// The key name is not one the table understands.
    #[error("Unknown key '{0}'")]
    UnknownKey(String),

    /// A modifier name is not recognised.
    #[error("Unknown modifier '{0}'")]
    UnknownModifier(String),

    /// A terminal key code that has no table gesture.
    #[error("Unsupported terminal key: {0}")]
    Unsupported(String),
}

/// Errors produced by [`TableConfig::validate`](crate::TableConfig::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A page must move focus by at least one row.
    #[error("Page size must be at least 1")]
    ZeroPageSize,
}
