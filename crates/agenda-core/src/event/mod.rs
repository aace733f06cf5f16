//! Event bus for observable booking-ledger events.
//!
//! Provides an `EventBus` that distributes `AgendaEvent` messages to all
//! subscribers via a `tokio::sync::broadcast` channel.

pub mod bus;

pub use bus::EventBus;
