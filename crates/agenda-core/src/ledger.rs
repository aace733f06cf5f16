//! The booking ledger.
//!
//! One `AgendaLedger` instance offers a single recurring service over a
//! bounded time window: callers reserve grid slots with escrowed payment, the
//! owner confirms them, bookers cancel for a refund while the cancellation
//! deadline allows, and the owner withdraws only funds no still-cancellable
//! booking might need back.
//!
//! All state lives behind one `tokio::sync::RwLock`, so mutations execute in
//! a single total order and queries observe one consistent snapshot. Refund
//! and withdrawal transfers run under the write lock: a failed transfer
//! leaves the ledger exactly as it was.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use agenda_types::account::AccountId;
use agenda_types::booking::Booking;
use agenda_types::config::AgendaConfig;
use agenda_types::error::{AgendaError, ConfigError};
use agenda_types::event::AgendaEvent;
use agenda_types::money::Amount;
use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::event::EventBus;
use crate::grid;
use crate::treasury::Treasury;

/// Broadcast capacity for the ledger's event channel.
const EVENT_CAPACITY: usize = 64;

/// All mutable ledger state, guarded by a single lock.
#[derive(Debug, Default)]
struct LedgerState {
    /// Primary map: slot start time -> current booking.
    bookings: BTreeMap<DateTime<Utc>, Booking>,
    /// Secondary index for per-booker enumeration, maintained
    /// transactionally alongside `bookings`.
    by_booker: HashMap<AccountId, BTreeSet<DateTime<Utc>>>,
    /// Escrowed funds currently held by the ledger.
    balance: Amount,
}

impl LedgerState {
    /// Sum of escrowed payments that a cancellation could still reclaim:
    /// bookings whose slot is more than `cancellable_before` away from `now`.
    fn reserved(&self, config: &AgendaConfig, now: DateTime<Utc>) -> Amount {
        self.bookings
            .iter()
            .filter(|(slot, _)| **slot - config.cancellable_before > now)
            .map(|(_, booking)| booking.paid_amount)
            .sum()
    }
}

/// Ledger for one bookable service.
///
/// Generic over the `Treasury` value-transfer seam and the `Clock` time
/// source so the calling system decides how funds move and what time it is.
pub struct AgendaLedger<T: Treasury, C: Clock> {
    config: AgendaConfig,
    treasury: T,
    clock: C,
    events: EventBus,
    state: RwLock<LedgerState>,
}

impl<T: Treasury, C: Clock> AgendaLedger<T, C> {
    /// Create an empty ledger with the given configuration.
    ///
    /// Fails with `ConfigError::InvalidTimeInterval` when the window does not
    /// divide evenly into slots, and with the other `ConfigError` variants
    /// for non-positive price/duration or a negative cancellation window.
    pub fn new(config: AgendaConfig, treasury: T, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            treasury,
            clock,
            events: EventBus::new(EVENT_CAPACITY),
            state: RwLock::new(LedgerState::default()),
        })
    }

    /// The immutable ledger configuration.
    pub fn config(&self) -> &AgendaConfig {
        &self.config
    }

    /// Subscribe to the ledger's event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<AgendaEvent> {
        self.events.subscribe()
    }

    /// Funds currently escrowed by the ledger.
    pub async fn balance(&self) -> Amount {
        self.state.read().await.balance
    }

    /// Escrowed funds still reclaimable by a cancellation at this instant.
    pub async fn reserved_balance(&self) -> Amount {
        let state = self.state.read().await;
        state.reserved(&self.config, self.clock.now())
    }

    /// Every grid slot with no current booking, in ascending order.
    ///
    /// Past grid slots are included; presentation layers filter for display
    /// and `book` rejects them anyway.
    pub async fn available_time_slots(&self) -> Vec<DateTime<Utc>> {
        let state = self.state.read().await;
        grid::slot_grid(&self.config)
            .into_iter()
            .filter(|slot| !state.bookings.contains_key(slot))
            .collect()
    }

    /// Reserve `slot` for `caller`, escrowing `amount_paid`.
    ///
    /// Preconditions, checked in this order:
    /// 1. the slot must be strictly in the future (`PastTimeslot`);
    /// 2. it must be a valid grid slot with no current booking
    ///    (`SlotUnavailable`, for off-grid and already-booked alike);
    /// 3. `amount_paid` must cover the service price (`InsufficientPayment`).
    ///
    /// Overpayment is accepted and escrowed in full. Emits `Booked`.
    pub async fn book(
        &self,
        caller: AccountId,
        slot: DateTime<Utc>,
        amount_paid: Amount,
    ) -> Result<(), AgendaError> {
        let mut state = self.state.write().await;

        if slot <= self.clock.now() {
            return Err(AgendaError::PastTimeslot);
        }
        if !grid::is_grid_slot(&self.config, slot) || state.bookings.contains_key(&slot) {
            return Err(AgendaError::SlotUnavailable);
        }
        if amount_paid < self.config.price_of_service {
            return Err(AgendaError::InsufficientPayment {
                required: self.config.price_of_service,
                paid: amount_paid,
            });
        }

        state.bookings.insert(slot, Booking::new(caller, amount_paid));
        state.by_booker.entry(caller).or_default().insert(slot);
        state.balance += amount_paid;

        info!(booker = %caller, slot = %slot, amount = amount_paid, "Slot booked");
        self.events.publish(AgendaEvent::Booked {
            booker: caller,
            slot,
            amount: amount_paid,
        });
        Ok(())
    }

    /// Confirm the booking at `slot`. Owner only; no funds move.
    ///
    /// Fails `NotOwner` / `NotBooked` / `AlreadyConfirmed`. Emits
    /// `BookingConfirmed` carrying the booker.
    pub async fn confirm_booking(
        &self,
        caller: AccountId,
        slot: DateTime<Utc>,
    ) -> Result<(), AgendaError> {
        if caller != self.config.owner {
            return Err(AgendaError::NotOwner);
        }

        let mut state = self.state.write().await;
        let booking = state.bookings.get_mut(&slot).ok_or(AgendaError::NotBooked)?;
        if booking.confirmed {
            return Err(AgendaError::AlreadyConfirmed);
        }
        booking.confirmed = true;
        let booker = booking.booker;

        info!(booker = %booker, slot = %slot, "Booking confirmed");
        self.events
            .publish(AgendaEvent::BookingConfirmed { booker, slot });
        Ok(())
    }

    /// Cancel the caller's booking at `slot` and refund the escrowed payment.
    ///
    /// Fails `NotYourBooking` unless a booking by `caller` exists at `slot`
    /// (an absent booking belongs to no one), and `TooLateToCancel` once the
    /// slot is within `cancellable_before` of the current time.
    ///
    /// Refund and deletion form one atomic unit: the refund transfer runs
    /// under the write lock and a transfer failure leaves the booking, the
    /// index, and the balance untouched. Emits `BookingCancelled`.
    pub async fn cancel_booking(
        &self,
        caller: AccountId,
        slot: DateTime<Utc>,
    ) -> Result<(), AgendaError> {
        let mut state = self.state.write().await;

        let refund = match state.bookings.get(&slot) {
            Some(booking) if booking.booker == caller => booking.paid_amount,
            _ => return Err(AgendaError::NotYourBooking),
        };
        if slot - self.config.cancellable_before <= self.clock.now() {
            return Err(AgendaError::TooLateToCancel);
        }

        self.treasury.transfer(&caller, refund).await?;

        state.bookings.remove(&slot);
        if let Some(slots) = state.by_booker.get_mut(&caller) {
            slots.remove(&slot);
            if slots.is_empty() {
                state.by_booker.remove(&caller);
            }
        }
        state.balance -= refund;

        info!(booker = %caller, slot = %slot, refunded = refund, "Booking cancelled");
        self.events.publish(AgendaEvent::BookingCancelled {
            booker: caller,
            slot,
            refunded: refund,
        });
        Ok(())
    }

    /// The caller's current bookings as two index-aligned sequences
    /// (slot timestamps and booking records), ascending by slot.
    pub async fn my_bookings(&self, caller: AccountId) -> (Vec<DateTime<Utc>>, Vec<Booking>) {
        let state = self.state.read().await;
        let Some(slots) = state.by_booker.get(&caller) else {
            return (Vec::new(), Vec::new());
        };

        let timestamps: Vec<DateTime<Utc>> = slots.iter().copied().collect();
        let bookings = timestamps
            .iter()
            .map(|slot| state.bookings[slot].clone())
            .collect();
        debug!(booker = %caller, count = timestamps.len(), "Listed bookings");
        (timestamps, bookings)
    }

    /// Withdraw `amount` of released escrow to the owner.
    ///
    /// Fails `NotOwner` for anyone else, `AmountExceedsBalance` when the
    /// ledger holds less than `amount`, and `WithdrawalExceedsAvailable` when
    /// the withdrawal would dip into funds a still-cancellable booking might
    /// reclaim. No booking state changes and no event is emitted.
    pub async fn withdraw(&self, caller: AccountId, amount: Amount) -> Result<(), AgendaError> {
        if caller != self.config.owner {
            return Err(AgendaError::NotOwner);
        }

        let mut state = self.state.write().await;
        if amount > state.balance {
            return Err(AgendaError::AmountExceedsBalance);
        }
        let reserved = state.reserved(&self.config, self.clock.now());
        if amount > state.balance - reserved {
            return Err(AgendaError::WithdrawalExceedsAvailable);
        }

        self.treasury.transfer(&self.config.owner, amount).await?;
        state.balance -= amount;

        info!(amount, remaining = state.balance, "Owner withdrawal");
        Ok(())
    }
}

impl<T: Treasury, C: Clock> std::fmt::Debug for AgendaLedger<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgendaLedger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
