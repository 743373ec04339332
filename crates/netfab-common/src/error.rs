//! Unified error types for the Netfab workspace.
//!
//! Driver implementations report their own failures through the same enum;
//! the orchestration layer wraps them without reinterpreting the cause.

use thiserror::Error;

use crate::types::DriverCategory;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum NetfabError {
    /// The plugin configuration document was empty.
    #[error("empty plugin configuration")]
    EmptyConfig,

    /// The plugin configuration document or one of its per-category
    /// fragments could not be parsed.
    #[error("malformed plugin configuration: {source}")]
    ConfigParse {
        /// Underlying parse error.
        #[from]
        source: serde_json::Error,
    },

    /// The selector named by the configuration has no registered driver.
    #[error("no {category} driver registered for selector {selector:?}")]
    UnregisteredDriver {
        /// Category the lookup was performed in.
        category: DriverCategory,
        /// Selector that had no entry.
        selector: String,
    },

    /// A selected driver's own initialization failed.
    #[error("{category} driver initialization failed: {source}")]
    DriverInit {
        /// Category of the failing driver.
        category: DriverCategory,
        /// The driver's error, preserved as the cause.
        #[source]
        source: Box<NetfabError>,
    },

    /// An operation was dispatched to a category with no active driver.
    #[error("no active {category} driver")]
    NotInitialized {
        /// Category the dispatch targeted.
        category: DriverCategory,
    },

    /// A declared operation that no driver currently provides.
    #[error("{operation} is not implemented")]
    NotImplemented {
        /// Name of the unimplemented operation.
        operation: &'static str,
    },

    /// A driver configuration value is invalid.
    #[error("invalid driver configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A driver's own operational failure.
    #[error("driver error: {message}")]
    Driver {
        /// Description of the failure.
        message: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, NetfabError>;
