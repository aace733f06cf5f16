//! Amounts held and transferred by the ledger.
//!
//! All arithmetic is done in the smallest indivisible unit of whatever
//! currency the surrounding system settles in (wei-style integers). The
//! ledger never deals in fractional amounts.

/// An amount of funds in the smallest indivisible unit.
pub type Amount = u128;
