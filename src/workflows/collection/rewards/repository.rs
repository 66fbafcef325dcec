use chrono::{DateTime, Utc};

use super::domain::{CatalogItem, Redemption, RedemptionId, RewardId, RewardTransaction};
use crate::workflows::collection::domain::{RequestId, UserId};

/// Result of the conditional collection-credit insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditInsert {
    /// The entry was appended and the balance incremented.
    Inserted(RewardTransaction),
    /// An `Add` entry for this request id already existed; nothing changed.
    Duplicate,
}

/// Storage port for the point balance, the ledger log, and redemptions.
///
/// Every mutating method executes as one atomic unit against the backing
/// store: the uniqueness check, the balance change, and the appended rows all
/// commit together or not at all. A database-backed implementation would rely
/// on a uniqueness constraint over `(request_id, ADD)` plus row-level locking
/// of the balance; the in-memory test stores take a single lock per call.
/// This keeps concurrent duplicate submissions from double-crediting or
/// double-debiting.
pub trait RewardStore: Send + Sync {
    /// Conditionally append an `Add` entry keyed on `request` and increment
    /// the user balance by `points` in the same unit. Returns
    /// [`CreditInsert::Duplicate`] without effect when an `Add` entry for the
    /// request already exists.
    fn credit_once(
        &self,
        user: UserId,
        request: RequestId,
        points: u32,
        description: &str,
    ) -> Result<CreditInsert, RewardStoreError>;

    /// Check the balance, debit `points`, append the `Redeem` entry, and
    /// create the redemption row in `Requested` state, all in the same unit.
    /// Fails with [`RewardStoreError::InsufficientPoints`] without any effect
    /// when the balance does not cover the debit.
    fn debit_for_redemption(
        &self,
        user: UserId,
        reward: RewardId,
        points: u32,
        description: &str,
    ) -> Result<Redemption, RewardStoreError>;

    /// Mark a redemption fulfilled at `at`. Already-fulfilled redemptions are
    /// returned unchanged, keeping repeated calls idempotent.
    fn fulfill(
        &self,
        redemption: RedemptionId,
        at: DateTime<Utc>,
    ) -> Result<Redemption, RewardStoreError>;

    fn balance(&self, user: UserId) -> Result<u32, RewardStoreError>;

    fn transactions_for(&self, user: UserId) -> Result<Vec<RewardTransaction>, RewardStoreError>;

    fn redemptions_for(&self, user: UserId) -> Result<Vec<Redemption>, RewardStoreError>;

    fn all_redemptions(&self) -> Result<Vec<Redemption>, RewardStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RewardStoreError {
    #[error("insufficient points: required {required}, available {available}")]
    InsufficientPoints { required: u32, available: u32 },
    #[error("redemption not found")]
    RedemptionNotFound,
    #[error("reward store unavailable: {0}")]
    Unavailable(String),
}

/// Catalog lookup collaborator; the catalog itself is maintained elsewhere.
pub trait RewardCatalog: Send + Sync {
    fn find(&self, id: RewardId) -> Result<Option<CatalogItem>, RewardStoreError>;

    fn active_items(&self) -> Result<Vec<CatalogItem>, RewardStoreError>;
}
