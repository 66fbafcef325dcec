//! The waste-collection workflow family: the request lifecycle, the
//! role-gated transitions that move it, and the reward-points ledger funded
//! by successful collections.

pub mod domain;
pub mod requests;
pub mod rewards;
pub mod status;

pub use domain::{
    Actor, ActorRole, CollectorId, CollectorProfile, RequestId, StoredFileRef, UploadedFile,
    UserId, WasteRequest, ZoneId,
};
pub use requests::{WasteRequestService, WorkflowError};
pub use rewards::{
    CollectionRewards, CreditOutcome, RewardConfig, RewardError, RewardLedger,
};
pub use status::{LegacyStatus, RequestStatus, StatusParseError};
