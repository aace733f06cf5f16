//! Treasury trait for moving escrowed funds out of the ledger.
//!
//! The ledger holds payments itself (a balance counter); refunds and owner
//! withdrawals leave through whatever payment rail the surrounding system
//! uses. Implementations live outside agenda-core -- `InMemoryTreasury` is
//! the reference implementation for tests, demos, and single-process setups.

use agenda_types::account::AccountId;
use agenda_types::error::TransferError;
use agenda_types::money::Amount;
use dashmap::DashMap;

/// Abstraction over the value-transfer mechanism.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
/// A transfer either fully completes or fails with no effect; the ledger
/// relies on this to keep booking state and fund custody in sync.
pub trait Treasury: Send + Sync {
    /// Pay `amount` out of the ledger's escrow to `to`.
    fn transfer(
        &self,
        to: &AccountId,
        amount: Amount,
    ) -> impl std::future::Future<Output = Result<(), TransferError>> + Send;
}

impl<T: Treasury> Treasury for std::sync::Arc<T> {
    fn transfer(
        &self,
        to: &AccountId,
        amount: Amount,
    ) -> impl std::future::Future<Output = Result<(), TransferError>> + Send {
        self.as_ref().transfer(to, amount)
    }
}

/// Treasury that credits transfers to an in-memory account table.
#[derive(Debug, Default)]
pub struct InMemoryTreasury {
    accounts: DashMap<AccountId, Amount>,
}

impl InMemoryTreasury {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total amount credited to `account` so far.
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.accounts.get(account).map(|b| *b).unwrap_or(0)
    }
}

impl Treasury for InMemoryTreasury {
    async fn transfer(&self, to: &AccountId, amount: Amount) -> Result<(), TransferError> {
        *self.accounts.entry(*to).or_insert(0) += amount;
        Ok(())
    }
}
