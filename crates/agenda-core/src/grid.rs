//! Slot-grid arithmetic.
//!
//! The grid is never stored: it is the ordered sequence
//! `first, first + duration, ..., last`, recomputed from the configuration
//! whenever availability is queried or a timestamp needs validating.

use agenda_types::config::AgendaConfig;
use chrono::{DateTime, Utc};

/// Enumerate the full slot grid in ascending order.
///
/// Length is `(last - first) / duration + 1` for any validated configuration.
pub fn slot_grid(config: &AgendaConfig) -> Vec<DateTime<Utc>> {
    let mut slots = Vec::with_capacity(config.slot_count());
    let mut slot = config.first_bookable_at;
    while slot <= config.last_bookable_at {
        slots.push(slot);
        slot += config.duration;
    }
    slots
}

/// Whether `timestamp` is a valid slot: inside the window and exactly on a
/// grid boundary.
pub fn is_grid_slot(config: &AgendaConfig, timestamp: DateTime<Utc>) -> bool {
    if timestamp < config.first_bookable_at || timestamp > config.last_bookable_at {
        return false;
    }
    let offset = (timestamp - config.first_bookable_at).num_milliseconds();
    offset % config.duration.num_milliseconds() == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_types::account::AccountId;
    use chrono::TimeDelta;

    fn config() -> AgendaConfig {
        let first = Utc::now();
        AgendaConfig {
            owner: AccountId::new(),
            price_of_service: 1,
            duration: TimeDelta::minutes(40),
            cancellable_before: TimeDelta::minutes(60),
            first_bookable_at: first,
            last_bookable_at: first + TimeDelta::hours(4),
        }
    }

    #[test]
    fn grid_covers_the_whole_window_in_order() {
        let config = config();
        let grid = slot_grid(&config);

        assert_eq!(grid.len(), 7);
        assert_eq!(grid[0], config.first_bookable_at);
        assert_eq!(*grid.last().unwrap(), config.last_bookable_at);
        for pair in grid.windows(2) {
            assert_eq!(pair[1] - pair[0], config.duration);
        }
    }

    #[test]
    fn single_slot_grid() {
        let mut config = config();
        config.last_bookable_at = config.first_bookable_at;
        assert_eq!(slot_grid(&config), vec![config.first_bookable_at]);
    }

    #[test]
    fn grid_membership() {
        let config = config();
        assert!(is_grid_slot(&config, config.first_bookable_at));
        assert!(is_grid_slot(&config, config.last_bookable_at));
        assert!(is_grid_slot(
            &config,
            config.first_bookable_at + TimeDelta::minutes(80)
        ));
    }

    #[test]
    fn off_grid_timestamps_are_rejected() {
        let config = config();
        // Misaligned inside the window
        assert!(!is_grid_slot(
            &config,
            config.first_bookable_at + TimeDelta::minutes(1)
        ));
        // Before the window
        assert!(!is_grid_slot(
            &config,
            config.first_bookable_at - TimeDelta::minutes(40)
        ));
        // Past the window, even though aligned
        assert!(!is_grid_slot(
            &config,
            config.last_bookable_at + TimeDelta::minutes(40)
        ));
    }

    #[test]
    fn every_grid_slot_is_a_member() {
        let config = config();
        for slot in slot_grid(&config) {
            assert!(is_grid_slot(&config, slot));
        }
    }
}
