//! Core business logic - framework-agnostic operations over the entities.
//!
//! Nothing in this module knows about Discord or HTTP; the bot and API layers
//! call into these functions and render the results. All functions are async
//! and return the crate [`Result`](crate::errors::Result) type.

/// Apollo giveaway configuration and the pending-execution hand-off
pub mod apollo;
/// Per-server bot configuration (cooldowns, delete-on-use policies)
pub mod bot_config;
/// In-memory per-user/per-menu cooldown tracking
pub mod cooldown;
/// The dispense state machine tying config, stock, and cooldowns together
pub mod dispense;
/// Menu option management (25-option cap, rename, cascade delete)
pub mod options;
/// Server name cache operations
pub mod server_name;
/// Stock item management and the random-pick / atomic-claim accessors
pub mod stock;

use crate::errors::{Error, Result};

/// Validates that a menu number names one of the two menu slots.
pub fn validate_menu_number(menu_number: i32) -> Result<()> {
    if menu_number == 1 || menu_number == 2 {
        Ok(())
    } else {
        Err(Error::Validation {
            message: format!("Menu number must be 1 or 2, got {menu_number}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_menu_number() {
        assert!(validate_menu_number(1).is_ok());
        assert!(validate_menu_number(2).is_ok());
        assert!(validate_menu_number(0).is_err());
        assert!(validate_menu_number(3).is_err());
    }
}
