use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflows::collection::domain::{RequestId, UserId};

/// Identifier of a catalog reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RewardId(pub u64);

impl fmt::Display for RewardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a redemption request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RedemptionId(pub u64);

impl fmt::Display for RedemptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reward category a free-form waste-type tag normalizes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WasteCategory {
    Dry,
    Wet,
    EWaste,
    Hazardous,
}

impl WasteCategory {
    /// Normalize a stored waste-type tag. Unknown tags fall back to `Dry`.
    pub fn from_waste_type(waste_type: &str) -> Self {
        match waste_type.trim().to_ascii_uppercase().as_str() {
            "ORGANIC" => WasteCategory::Wet,
            "E_WASTE" => WasteCategory::EWaste,
            "HAZARDOUS" => WasteCategory::Hazardous,
            // PLASTIC, METAL, PAPER, and anything unrecognized.
            _ => WasteCategory::Dry,
        }
    }
}

/// Whether a ledger entry credits or debits points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Add,
    Redeem,
}

/// Immutable, append-only ledger entry.
///
/// `points_added` and `points_spent` are mutually exclusive; one of them is
/// always zero. `request_id` is present only on collection credits and
/// doubles as the idempotency key: the store guarantees at most one `Add`
/// entry per request id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTransaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub request_id: Option<RequestId>,
    pub points_added: u32,
    pub points_spent: u32,
    pub kind: TransactionKind,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Catalog reward as resolved by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: RewardId,
    pub name: String,
    pub points_required: i64,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RedemptionStatus {
    Requested,
    Fulfilled,
}

/// A redemption against the point balance. Points are fixed at creation and
/// already debited; fulfillment only flips the status once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redemption {
    pub id: RedemptionId,
    pub user_id: UserId,
    pub reward_id: RewardId,
    pub points_used: u32,
    pub status: RedemptionStatus,
    pub created_at: DateTime<Utc>,
    pub fulfilled_at: Option<DateTime<Utc>>,
}
