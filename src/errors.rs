//! Unified error type for `StockVend`.
//!
//! Every fallible operation in the crate returns [`Result`], so database,
//! configuration, and Discord failures all propagate through one enum. The
//! HTTP layer maps these variants onto status codes and the bot layer maps
//! them onto generic ephemeral replies.

use thiserror::Error;

/// Crate-wide error enum covering configuration, validation, storage, and
/// framework failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing configuration (settings file, environment).
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the configuration problem
        message: String,
    },

    /// Rejected input (empty names, out-of-range menu numbers, missing fields).
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of what failed validation
        message: String,
    },

    /// The referenced menu option does not exist for the server.
    #[error("Option {option_id} not found")]
    OptionNotFound {
        /// Primary key of the missing option
        option_id: i64,
    },

    /// A menu already holds the maximum number of options Discord can render.
    #[error("Menu already has the maximum of {limit} options")]
    OptionLimitReached {
        /// The per-menu option cap
        limit: u64,
    },

    /// An Apollo execution was requested while one is already pending.
    #[error("A giveaway is already running for server {server_id}")]
    GiveawayAlreadyRunning {
        /// Discord guild id with the active giveaway
        server_id: String,
    },

    /// Any failure surfaced by the database driver.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (settings file reads, socket binds).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error.
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
