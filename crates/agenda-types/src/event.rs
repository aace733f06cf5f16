//! Events emitted by the booking ledger.
//!
//! `AgendaEvent` is broadcast after every successful mutation that touches a
//! booking. All variants are Clone + Send + Sync for use with tokio broadcast
//! channels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::money::Amount;

/// Events observable by subscribers (UI, logging, automation).
///
/// Withdrawals move funds but touch no booking and emit nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgendaEvent {
    /// A slot was reserved. `amount` is the full escrowed payment.
    Booked {
        booker: AccountId,
        slot: DateTime<Utc>,
        amount: Amount,
    },

    /// The owner confirmed a booking. No funds moved.
    BookingConfirmed {
        booker: AccountId,
        slot: DateTime<Utc>,
    },

    /// A booking was cancelled and its escrowed payment refunded.
    BookingCancelled {
        booker: AccountId,
        slot: DateTime<Utc>,
        refunded: Amount,
    },
}

impl AgendaEvent {
    /// The slot timestamp this event concerns.
    pub fn slot(&self) -> DateTime<Utc> {
        match self {
            AgendaEvent::Booked { slot, .. }
            | AgendaEvent::BookingConfirmed { slot, .. }
            | AgendaEvent::BookingCancelled { slot, .. } => *slot,
        }
    }

    /// The booker the event concerns.
    pub fn booker(&self) -> AccountId {
        match self {
            AgendaEvent::Booked { booker, .. }
            | AgendaEvent::BookingConfirmed { booker, .. }
            | AgendaEvent::BookingCancelled { booker, .. } => *booker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_booked_serde_roundtrip() {
        let event = AgendaEvent::Booked {
            booker: AccountId::new(),
            slot: Utc::now(),
            amount: 1_000_000_000_000_000_000,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"booked\""));
        let parsed: AgendaEvent = serde_json::from_str(&json).unwrap();
        assert!(matches!(parsed, AgendaEvent::Booked { .. }));
    }

    #[test]
    fn test_booking_confirmed_serde_roundtrip() {
        let event = AgendaEvent::BookingConfirmed {
            booker: AccountId::new(),
            slot: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"booking_confirmed\""));
        let parsed: AgendaEvent = serde_json::from_str(&json).unwrap();
        assert!(matches!(parsed, AgendaEvent::BookingConfirmed { .. }));
    }

    #[test]
    fn test_booking_cancelled_serde_roundtrip() {
        let event = AgendaEvent::BookingCancelled {
            booker: AccountId::new(),
            slot: Utc::now(),
            refunded: 7,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"booking_cancelled\""));
        let parsed: AgendaEvent = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            parsed,
            AgendaEvent::BookingCancelled { refunded: 7, .. }
        ));
    }

    #[test]
    fn test_slot_and_booker_accessors() {
        let booker = AccountId::new();
        let slot = Utc::now();
        let events = vec![
            AgendaEvent::Booked {
                booker,
                slot,
                amount: 1,
            },
            AgendaEvent::BookingConfirmed { booker, slot },
            AgendaEvent::BookingCancelled {
                booker,
                slot,
                refunded: 1,
            },
        ];
        for event in events {
            assert_eq!(event.slot(), slot, "slot accessor for {event:?}");
            assert_eq!(event.booker(), booker, "booker accessor for {event:?}");
        }
    }
}
