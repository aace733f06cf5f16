//! Immutable configuration of a booking ledger.
//!
//! The four service parameters plus the bookable window are fixed when the
//! ledger is created and never change afterwards. Everything else the ledger
//! knows (the slot grid, the escrow partition) is derived from these values.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::error::ConfigError;
use crate::money::Amount;

/// Configuration of one booking ledger, immutable after creation.
///
/// The bookable window is inclusive on both ends and must divide evenly into
/// slots of `duration`, so every point in the window lies on a slot boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaConfig {
    /// Identity of the service operator. Only the owner may confirm bookings
    /// or withdraw released funds.
    pub owner: AccountId,
    /// Amount required to reserve any slot.
    pub price_of_service: Amount,
    /// Fixed length of one slot and the step between slot start times.
    #[serde(with = "timedelta_ms")]
    pub duration: TimeDelta,
    /// A booking may be cancelled only while its slot starts more than this
    /// span in the future.
    #[serde(with = "timedelta_ms")]
    pub cancellable_before: TimeDelta,
    /// First bookable slot start (inclusive).
    pub first_bookable_at: DateTime<Utc>,
    /// Last bookable slot start (inclusive).
    pub last_bookable_at: DateTime<Utc>,
}

impl AgendaConfig {
    /// Check the creation-time invariants.
    ///
    /// - `duration` must be positive.
    /// - `price_of_service` must be positive.
    /// - `cancellable_before` must be non-negative.
    /// - The window must be non-empty and align exactly on slot boundaries:
    ///   `last >= first` and `(last - first) % duration == 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration <= TimeDelta::zero() {
            return Err(ConfigError::InvalidDuration);
        }
        if self.price_of_service == 0 {
            return Err(ConfigError::InvalidPrice);
        }
        if self.cancellable_before < TimeDelta::zero() {
            return Err(ConfigError::InvalidCancellationWindow);
        }
        if self.last_bookable_at < self.first_bookable_at {
            return Err(ConfigError::InvalidTimeInterval);
        }
        let window = self.last_bookable_at - self.first_bookable_at;
        if window.num_milliseconds() % self.duration.num_milliseconds() != 0 {
            return Err(ConfigError::InvalidTimeInterval);
        }
        Ok(())
    }

    /// Number of slots on the grid: `(last - first) / duration + 1`.
    ///
    /// Only meaningful on a validated configuration.
    pub fn slot_count(&self) -> usize {
        let window = (self.last_bookable_at - self.first_bookable_at).num_milliseconds();
        (window / self.duration.num_milliseconds()) as usize + 1
    }
}

/// Serialize `TimeDelta` as integer milliseconds (matching the millisecond
/// precision the ledger operates at).
mod timedelta_ms {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(delta: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(delta.num_milliseconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let ms = i64::deserialize(deserializer)?;
        Ok(TimeDelta::milliseconds(ms))
    }
}
