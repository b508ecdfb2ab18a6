//! Crate-wide error types.
//!
//! Per-genome evaluation degradations (bad expression syntax, undefined variables,
//! non-string results) and strategy-induced bankruptcy are *not* represented here —
//! those are absorbed silently at the participant level (see [`crate::market`]) and
//! never surface as a [`GeError`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeError {
    #[error("grammar error: {0}")]
    Grammar(String),

    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Error returned when a strategy builder is missing required configuration.
/// Mirrors the teacher's own small `&'static str` builder-validation errors
/// (see e.g. `genotype/builder.rs::TryFromBuilderError` upstream).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TryFromBuilderError(pub &'static str);

impl std::fmt::Display for TryFromBuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for TryFromBuilderError {}
