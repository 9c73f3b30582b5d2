//! Route handlers grouped by resource.
//!
//! Every handler follows the same shape: unwrap the session-checked request,
//! validate required fields with a 400 per missing field, delegate to
//! [`crate::core`], and wrap the result in the success envelope.

/// Apollo giveaway config and execution hand-off routes
pub mod apollo;
/// Bot config read/upsert routes
pub mod bot_config;
/// Menu option CRUD routes
pub mod options;
/// Server name cache routes
pub mod server_names;
/// Stock loading, listing, and deletion routes
pub mod stock;
