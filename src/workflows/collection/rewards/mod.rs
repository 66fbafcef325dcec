//! Reward-points ledger and redemption tracking.
//!
//! Collections credit points into an append-only transaction log with a
//! per-request idempotency guarantee; redemptions debit the same balance and
//! move through `Requested -> Fulfilled` exactly once.

pub mod config;
pub mod domain;
pub mod repository;
pub mod service;


pub use config::RewardConfig;
pub use domain::{
    CatalogItem, Redemption, RedemptionId, RedemptionStatus, RewardId, RewardTransaction,
    TransactionId, TransactionKind, WasteCategory,
};
pub use repository::{CreditInsert, RewardCatalog, RewardStore, RewardStoreError};
pub use service::{CollectionRewards, CreditOutcome, RewardError, RewardLedger};
