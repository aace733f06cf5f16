use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::money::Amount;

/// A reservation of one slot, keyed in the ledger by the slot's start time.
///
/// Created unconfirmed by a successful reservation. `confirmed` flips true
/// once when the owner confirms; the whole record is destroyed (and the paid
/// amount refunded) by cancellation. A slot with no `Booking` is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Identity that made (and may cancel) this booking.
    pub booker: AccountId,
    /// Whether the owner has confirmed the booking.
    pub confirmed: bool,
    /// The full amount escrowed for this booking. Overpayment above the
    /// service price is accepted and stored as sent.
    pub paid_amount: Amount,
}

impl Booking {
    /// A fresh, unconfirmed booking holding `paid_amount` in escrow.
    pub fn new(booker: AccountId, paid_amount: Amount) -> Self {
        Self {
            booker,
            confirmed: false,
            paid_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_booking_starts_unconfirmed() {
        let booker = AccountId::new();
        let booking = Booking::new(booker, 42);
        assert_eq!(booking.booker, booker);
        assert!(!booking.confirmed);
        assert_eq!(booking.paid_amount, 42);
    }

    #[test]
    fn test_booking_serde_roundtrip() {
        let booking = Booking::new(AccountId::new(), 1_000_000_000_000_000_000);
        let json = serde_json::to_string(&booking).unwrap();
        let parsed: Booking = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, booking);
    }
}
