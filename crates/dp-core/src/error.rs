//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` impls or wrap it as one variant.  Contention
//! outcomes (a fork already being held) are ordinary `bool` control flow and
//! never appear here.

use thiserror::Error;

/// The top-level error type for `dp-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `dp-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
