//! Common types and utilities shared across txtroute crates.
//!
//! This crate carries the shared error type and the observability helpers
//! used by the binary and the integration tests. It stays small so that
//! every other crate can depend on it without pulling in anything heavy.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`TxtRouteError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! ```rust
//! use txtroute_common::TxtRouteError;
//!
//! let err = TxtRouteError::InvalidCatalog("duplicate group id `ops`".into());
//! assert_eq!(err.to_string(), "Invalid group catalog: duplicate group id `ops`");
//! ```

pub mod observability;

/// Error types used across the txtroute workspace.
///
/// Command recognition itself never fails; an unrecognised command is a
/// plain `None`. These variants cover the surroundings: loading the
/// catalog, reading input and writing results.
#[derive(thiserror::Error, Debug)]
pub enum TxtRouteError {
    /// Configuration was incomplete or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The group catalog contains entries the recognizer cannot route to.
    #[error("Invalid group catalog: {0}")]
    InvalidCatalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenient alias for results that use [`TxtRouteError`].
pub type Result<T> = std::result::Result<T, TxtRouteError>;
