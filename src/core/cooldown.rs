//! Cooldown tracking for stock dispensing.
//!
//! The tracker is a process-local map from (user, menu) to the instant the
//! user's cooldown expires. It is shared between concurrent interaction
//! handlers, so the check and the conditional write happen under a single
//! lock acquisition - two simultaneous requests from the same user cannot
//! both pass. Expired entries are swept on every check, keeping the map
//! bounded by the number of users active inside their cooldown window.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Key identifying one user's cooldown on one menu
type CooldownKey = (String, i32);

/// In-memory cooldown tracker shared by all interaction handlers.
#[derive(Debug, Default)]
pub struct CooldownTracker {
    entries: Mutex<HashMap<CooldownKey, Instant>>,
}

impl CooldownTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks whether a user may dispense from a menu.
    ///
    /// Returns 0 and starts a new cooldown window when the user is clear;
    /// otherwise returns the remaining whole seconds (rounded up) without
    /// touching the stored expiry.
    pub fn check(&self, user_id: &str, menu_number: i32, cooldown: Duration) -> u64 {
        self.check_at(user_id, menu_number, cooldown, Instant::now())
    }

    /// Time-injectable variant of [`check`](Self::check) used by tests.
    fn check_at(&self, user_id: &str, menu_number: i32, cooldown: Duration, now: Instant) -> u64 {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Sweep everything already expired so the map cannot grow without
        // bound over the process lifetime.
        entries.retain(|_, expiry| *expiry > now);

        let key = (user_id.to_string(), menu_number);
        if let Some(expiry) = entries.get(&key) {
            return seconds_remaining(*expiry, now);
        }

        entries.insert(key, now + cooldown);
        0
    }

    /// Number of entries currently tracked (post-sweep count is only exact
    /// right after a `check`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the tracker holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whole seconds until `expiry`, rounded up so a user is never told to wait 0.
fn seconds_remaining(expiry: Instant, now: Instant) -> u64 {
    let remaining = expiry.saturating_duration_since(now);
    let mut secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        secs += 1;
    }
    secs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_check_passes_and_starts_cooldown() {
        let tracker = CooldownTracker::new();
        let now = Instant::now();

        assert_eq!(tracker.check_at("user", 1, Duration::from_secs(60), now), 0);

        let remaining =
            tracker.check_at("user", 1, Duration::from_secs(60), now + Duration::from_secs(10));
        assert!(remaining > 0 && remaining <= 60);
        assert_eq!(remaining, 50);
    }

    #[test]
    fn test_check_passes_again_after_expiry() {
        let tracker = CooldownTracker::new();
        let now = Instant::now();

        assert_eq!(tracker.check_at("user", 1, Duration::from_secs(5), now), 0);
        assert_eq!(
            tracker.check_at("user", 1, Duration::from_secs(5), now + Duration::from_secs(5)),
            0
        );
    }

    #[test]
    fn test_menus_cool_down_independently() {
        let tracker = CooldownTracker::new();
        let now = Instant::now();

        assert_eq!(tracker.check_at("user", 1, Duration::from_secs(60), now), 0);
        assert_eq!(tracker.check_at("user", 2, Duration::from_secs(60), now), 0);
        assert!(tracker.check_at("user", 1, Duration::from_secs(60), now) > 0);
    }

    #[test]
    fn test_remaining_seconds_round_up() {
        let tracker = CooldownTracker::new();
        let now = Instant::now();

        tracker.check_at("user", 1, Duration::from_secs(10), now);
        let remaining =
            tracker.check_at("user", 1, Duration::from_secs(10), now + Duration::from_millis(9500));
        assert_eq!(remaining, 1);
    }

    #[test]
    fn test_expired_entries_are_evicted() {
        let tracker = CooldownTracker::new();
        let now = Instant::now();

        for i in 0..100 {
            tracker.check_at(&format!("user{i}"), 1, Duration::from_secs(5), now);
        }
        assert_eq!(tracker.len(), 100);

        // A single check after expiry sweeps the whole map
        tracker.check_at("fresh", 1, Duration::from_secs(5), now + Duration::from_secs(6));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_failed_check_does_not_extend_cooldown() {
        let tracker = CooldownTracker::new();
        let now = Instant::now();

        tracker.check_at("user", 1, Duration::from_secs(10), now);
        // Spamming while on cooldown must not push the expiry out
        tracker.check_at("user", 1, Duration::from_secs(10), now + Duration::from_secs(5));
        assert_eq!(
            tracker.check_at("user", 1, Duration::from_secs(10), now + Duration::from_secs(10)),
            0
        );
    }
}
