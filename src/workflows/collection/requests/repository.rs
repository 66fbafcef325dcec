use chrono::{DateTime, Utc};

use crate::workflows::collection::domain::{
    CollectorId, CollectorProfile, RequestId, StoredFileRef, UploadedFile, UserId, WasteRequest,
    ZoneId,
};
use crate::workflows::collection::status::RequestStatus;

/// Fields of a request before the store assigns its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWasteRequest {
    pub user_id: UserId,
    pub zone_id: ZoneId,
    pub waste_type: String,
    pub weight_kg: f64,
    pub status: RequestStatus,
    pub pickup_address: String,
    pub reward_points: u32,
    pub image_ref: Option<StoredFileRef>,
    pub created_at: DateTime<Utc>,
}

/// Storage port for waste requests. Rows are never deleted; the collected
/// and closed ones remain as the audit trail.
pub trait WasteRequestRepository: Send + Sync {
    fn insert(&self, request: NewWasteRequest) -> Result<WasteRequest, RepositoryError>;
    fn update(&self, request: WasteRequest) -> Result<WasteRequest, RepositoryError>;
    fn fetch(&self, id: RequestId) -> Result<Option<WasteRequest>, RepositoryError>;
    fn all(&self) -> Result<Vec<WasteRequest>, RepositoryError>;
    fn for_user(&self, user: UserId) -> Result<Vec<WasteRequest>, RepositoryError>;
    fn for_collector(&self, collector: CollectorId) -> Result<Vec<WasteRequest>, RepositoryError>;
}

/// Directory of collector profiles, maintained by an external collaborator.
pub trait CollectorDirectory: Send + Sync {
    fn find(&self, id: CollectorId) -> Result<Option<CollectorProfile>, RepositoryError>;
}

/// File-reference collaborator: stores raw upload bytes under a logical
/// folder and hands back an opaque location.
pub trait FileStore: Send + Sync {
    fn store(&self, folder: &str, file: &UploadedFile) -> Result<StoredFileRef, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("file storage unavailable: {0}")]
    Unavailable(String),
}
