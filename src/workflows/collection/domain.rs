use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::status::RequestStatus;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a waste-pickup request.
    RequestId
);
id_type!(
    /// Identifier of a resident account.
    UserId
);
id_type!(
    /// Identifier of a collector profile.
    CollectorId
);
id_type!(
    /// Identifier of a collection zone; a plain foreign-key association.
    ZoneId
);

/// An authenticated principal, resolved by the auth collaborator before any
/// workflow call. The collector profile id is resolved there too, so the core
/// never has to look collectors up by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    pub email: String,
    pub role: ActorRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorRole {
    User,
    Collector { collector_id: CollectorId },
    Admin,
}

impl Actor {
    pub fn user(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            role: ActorRole::User,
        }
    }

    pub fn collector(user_id: UserId, collector_id: CollectorId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            role: ActorRole::Collector { collector_id },
        }
    }

    pub fn admin(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            role: ActorRole::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, ActorRole::Admin)
    }

    /// Collector assignment is an admin capability.
    pub fn can_assign(&self) -> bool {
        self.is_admin()
    }

    /// Redemption fulfillment is an admin capability.
    pub fn can_fulfill(&self) -> bool {
        self.is_admin()
    }

    /// Only regular residents spend points.
    pub fn can_redeem(&self) -> bool {
        matches!(self.role, ActorRole::User)
    }

    pub fn collector_id(&self) -> Option<CollectorId> {
        match self.role {
            ActorRole::Collector { collector_id } => Some(collector_id),
            _ => None,
        }
    }

    pub fn role_name(&self) -> &'static str {
        match self.role {
            ActorRole::User => "USER",
            ActorRole::Collector { .. } => "COLLECTOR",
            ActorRole::Admin => "ADMIN",
        }
    }
}

/// Collector profile as exposed by the directory collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorProfile {
    pub id: CollectorId,
    pub name: String,
    pub email: String,
}

/// Raw upload handed to the file-reference collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Opaque stored-location reference returned by the file collaborator. The
/// core never interprets its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFileRef(pub String);

/// A waste-pickup request tracked through the collection lifecycle.
///
/// Requests are never deleted; closed and collected rows stay around as the
/// audit trail. `reward_points` is zero until the request reaches
/// `Collected`, and `collected_time` is set exactly when that happens. The
/// status field serializes through the legacy vocabulary, so an `Assigned`
/// request round-trips externally as `PENDING`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteRequest {
    pub id: RequestId,
    pub user_id: UserId,
    pub collector_id: Option<CollectorId>,
    pub zone_id: ZoneId,
    pub waste_type: String,
    pub weight_kg: f64,
    pub status: RequestStatus,
    pub pickup_address: String,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub collected_time: Option<DateTime<Utc>>,
    pub reward_points: u32,
    pub image_ref: Option<StoredFileRef>,
    pub collector_proof_ref: Option<StoredFileRef>,
    pub created_at: DateTime<Utc>,
}

impl WasteRequest {
    /// External "unassigned" view: no collector on record, or a status that
    /// still parses as `Created`. This is how downstream consumers tell
    /// `Created` and `Assigned` apart despite the lossy legacy projection.
    pub fn is_unassigned(&self) -> bool {
        self.collector_id.is_none() || self.status == RequestStatus::Created
    }
}
