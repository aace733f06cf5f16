//! Shared domain types for the Agenda booking ledger.
//!
//! This crate contains the core domain types used across the Agenda workspace:
//! account identity, amounts, the immutable ledger configuration, booking
//! records, emitted events, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod account;
pub mod booking;
pub mod config;
pub mod error;
pub mod event;
pub mod money;
