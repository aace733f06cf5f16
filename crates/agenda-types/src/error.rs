use thiserror::Error;

use crate::money::Amount;

/// Errors rejecting ledger creation. Fatal to that construction attempt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid time interval provided")]
    InvalidTimeInterval,

    #[error("price of service must be positive")]
    InvalidPrice,

    #[error("slot duration must be positive")]
    InvalidDuration,

    #[error("cancellation window must not be negative")]
    InvalidCancellationWindow,
}

/// Errors rejecting a ledger operation.
///
/// Every failure is a synchronous rejection with no partial state change; the
/// ledger never retries and callers decide whether to try again with
/// different parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgendaError {
    #[error("only the owner may perform this operation")]
    NotOwner,

    #[error("the selected timeslot is in the past")]
    PastTimeslot,

    #[error("the selected timeslot isn't available")]
    SlotUnavailable,

    #[error("should pay the price of the service to make a booking: required {required}, paid {paid}")]
    InsufficientPayment { required: Amount, paid: Amount },

    #[error("no booking exists at the selected timeslot")]
    NotBooked,

    #[error("the booking is already confirmed")]
    AlreadyConfirmed,

    #[error("the booking does not belong to the caller")]
    NotYourBooking,

    #[error("too late to cancel the booking")]
    TooLateToCancel,

    #[error("withdrawal amount exceeds the ledger balance")]
    AmountExceedsBalance,

    #[error("withdrawal amount exceeds the available (non-reserved) balance")]
    WithdrawalExceedsAvailable,

    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),
}

/// Errors from the caller-supplied value-transfer mechanism (used by trait
/// definitions in agenda-core).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("transfer rejected: {0}")]
    Rejected(String),

    #[error("transfer backend unavailable")]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidTimeInterval;
        assert_eq!(err.to_string(), "invalid time interval provided");
    }

    #[test]
    fn test_insufficient_payment_display() {
        let err = AgendaError::InsufficientPayment {
            required: 100,
            paid: 40,
        };
        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("40"));
    }

    #[test]
    fn test_transfer_error_converts_into_agenda_error() {
        let err: AgendaError = TransferError::Unavailable.into();
        assert!(matches!(
            err,
            AgendaError::Transfer(TransferError::Unavailable)
        ));
    }
}
