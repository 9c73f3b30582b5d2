//! The dispense state machine - what happens when a user picks an option.
//!
//! Framework-agnostic: the Discord layer parses the interaction, calls
//! [`dispense`], and renders the returned [`DispenseOutcome`]. The step order
//! is deliberate: stock is peeked BEFORE the cooldown check, so a user
//! hammering an empty option never burns their cooldown.

use crate::{
    core::{bot_config, cooldown::CooldownTracker, stock},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::time::Duration;

/// Terminal result of one select-menu dispense request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispenseOutcome {
    /// The option has no stock; the cooldown was not consumed.
    NoStock,
    /// The user is still cooling down from an earlier dispense.
    OnCooldown {
        /// Whole seconds the user must still wait
        seconds_remaining: u64,
    },
    /// A stock line was handed out.
    Dispensed {
        /// The opaque stock payload to show the user
        data: String,
    },
    /// Delete-on-use was set but every candidate row was claimed by
    /// concurrent dispenses between the peek and the claim.
    ClaimFailed,
}

/// Runs the dispense flow for one (user, option) selection.
///
/// Steps: fetch the server's config, peek for stock (NO_STOCK is terminal and
/// leaves the cooldown untouched), consume the cooldown, then either return
/// the peeked line (delete-on-use off) or atomically claim a row
/// (delete-on-use on).
pub async fn dispense(
    db: &DatabaseConnection,
    cooldowns: &CooldownTracker,
    server_id: &str,
    user_id: &str,
    option_id: i64,
    menu_number: i32,
) -> Result<DispenseOutcome> {
    let config = bot_config::get_bot_config(db, server_id).await?;
    let cooldown_secs = config.cooldown_for(menu_number);
    let delete_on_use = config.delete_on_use_for(menu_number);

    let Some(peeked) = stock::get_random_stock(db, server_id, option_id, menu_number).await? else {
        return Ok(DispenseOutcome::NoStock);
    };

    let cooldown = Duration::from_secs(cooldown_secs.max(0).unsigned_abs());
    let seconds_remaining = cooldowns.check(user_id, menu_number, cooldown);
    if seconds_remaining > 0 {
        return Ok(DispenseOutcome::OnCooldown { seconds_remaining });
    }

    if delete_on_use {
        match stock::take_random_stock(db, server_id, option_id, menu_number).await? {
            Some(claimed) => Ok(DispenseOutcome::Dispensed { data: claimed.data }),
            None => Ok(DispenseOutcome::ClaimFailed),
        }
    } else {
        Ok(DispenseOutcome::Dispensed { data: peeked.data })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]
    use super::*;
    use crate::core::{bot_config::upsert_bot_config, stock::add_stock};
    use crate::test_utils::setup_with_option;

    #[tokio::test]
    async fn test_no_stock_leaves_cooldown_untouched() -> Result<()> {
        let (db, option) = setup_with_option().await?;
        let cooldowns = CooldownTracker::new();

        let outcome = dispense(&db, &cooldowns, "server", "user", option.id, 1).await?;
        assert_eq!(outcome, DispenseOutcome::NoStock);

        // Now stock arrives; the earlier empty request must not have started
        // a cooldown window.
        add_stock(&db, "server", option.id, "a:b", 1).await?;
        let outcome = dispense(&db, &cooldowns, "server", "user", option.id, 1).await?;
        assert_eq!(
            outcome,
            DispenseOutcome::Dispensed {
                data: "a:b".to_string()
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_second_request_hits_cooldown() -> Result<()> {
        let (db, option) = setup_with_option().await?;
        let cooldowns = CooldownTracker::new();
        add_stock(&db, "server", option.id, "a:b", 1).await?;

        let first = dispense(&db, &cooldowns, "server", "user", option.id, 1).await?;
        assert!(matches!(first, DispenseOutcome::Dispensed { .. }));

        let second = dispense(&db, &cooldowns, "server", "user", option.id, 1).await?;
        match second {
            DispenseOutcome::OnCooldown { seconds_remaining } => {
                assert!(seconds_remaining > 0 && seconds_remaining <= 60);
            }
            other => panic!("expected OnCooldown, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_cooldown_is_per_user() -> Result<()> {
        let (db, option) = setup_with_option().await?;
        let cooldowns = CooldownTracker::new();
        add_stock(&db, "server", option.id, "a:b", 1).await?;

        let first = dispense(&db, &cooldowns, "server", "alice", option.id, 1).await?;
        assert!(matches!(first, DispenseOutcome::Dispensed { .. }));

        let other_user = dispense(&db, &cooldowns, "server", "bob", option.id, 1).await?;
        assert!(matches!(other_user, DispenseOutcome::Dispensed { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_on_use_off_keeps_rows() -> Result<()> {
        let (db, option) = setup_with_option().await?;
        add_stock(&db, "server", option.id, "a:b", 1).await?;
        add_stock(&db, "server", option.id, "c:d", 1).await?;

        // Fresh tracker per call so cooldowns don't interfere
        for _ in 0..5 {
            let cooldowns = CooldownTracker::new();
            let outcome = dispense(&db, &cooldowns, "server", "user", option.id, 1).await?;
            match outcome {
                DispenseOutcome::Dispensed { data } => {
                    assert!(data == "a:b" || data == "c:d");
                }
                other => panic!("expected Dispensed, got {other:?}"),
            }
        }

        let remaining = crate::core::stock::get_option_stock(&db, "server", option.id, 1).await?;
        assert_eq!(remaining.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_on_use_consumes_rows() -> Result<()> {
        let (db, option) = setup_with_option().await?;
        upsert_bot_config(&db, "server", 0, 0, true, true).await?;
        add_stock(&db, "server", option.id, "a:b", 1).await?;
        add_stock(&db, "server", option.id, "c:d", 1).await?;

        let mut seen = Vec::new();
        for _ in 0..2 {
            let cooldowns = CooldownTracker::new();
            match dispense(&db, &cooldowns, "server", "user", option.id, 1).await? {
                DispenseOutcome::Dispensed { data } => seen.push(data),
                other => panic!("expected Dispensed, got {other:?}"),
            }
        }

        // Both rows were handed out exactly once
        seen.sort_unstable();
        assert_eq!(seen, ["a:b", "c:d"]);

        let cooldowns = CooldownTracker::new();
        let outcome = dispense(&db, &cooldowns, "server", "user", option.id, 1).await?;
        assert_eq!(outcome, DispenseOutcome::NoStock);
        Ok(())
    }
}
