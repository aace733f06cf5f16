//! Booking ledger logic and trait seam definitions for Agenda.
//!
//! This crate defines the "ports" the surrounding system implements -- the
//! `Clock` time source and the `Treasury` value-transfer mechanism -- and the
//! `AgendaLedger` that owns all booking state. It depends only on
//! `agenda-types`, never on any transport or persistence crate.

pub mod clock;
pub mod event;
pub mod grid;
pub mod ledger;
pub mod treasury;

pub use clock::{Clock, ManualClock, SystemClock};
pub use event::EventBus;
pub use ledger::AgendaLedger;
pub use treasury::{InMemoryTreasury, Treasury};
