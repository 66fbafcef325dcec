use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use super::repository::{
    CollectorDirectory, FileStore, NewWasteRequest, RepositoryError, StorageError,
    WasteRequestRepository,
};
use crate::config::UploadConfig;
use crate::workflows::collection::domain::{
    Actor, ActorRole, CollectorId, RequestId, UploadedFile, UserId, WasteRequest, ZoneId,
};
use crate::workflows::collection::rewards::service::{
    CollectionRewards, CreditOutcome, RewardError,
};
use crate::workflows::collection::status::{RequestStatus, StatusParseError};

/// Orchestrates the pickup lifecycle: request intake, collector assignment,
/// status transitions, and proof-of-collection uploads. Consults the status
/// lifecycle for legality and the reward ledger on the single crediting edge.
pub struct WasteRequestService<R, C, F, L> {
    requests: Arc<R>,
    collectors: Arc<C>,
    files: Arc<F>,
    rewards: Arc<L>,
    upload: UploadConfig,
}

impl<R, C, F, L> WasteRequestService<R, C, F, L>
where
    R: WasteRequestRepository + 'static,
    C: CollectorDirectory + 'static,
    F: FileStore + 'static,
    L: CollectionRewards + 'static,
{
    pub fn new(
        requests: Arc<R>,
        collectors: Arc<C>,
        files: Arc<F>,
        rewards: Arc<L>,
        upload: UploadConfig,
    ) -> Self {
        Self {
            requests,
            collectors,
            files,
            rewards,
            upload,
        }
    }

    /// Open a new pickup request for a resident. The request starts in
    /// `Created` with zero reward points; an optional evidence image is
    /// handed to the file collaborator first.
    pub fn create_request(
        &self,
        user_id: UserId,
        zone_id: ZoneId,
        waste_type: &str,
        weight_kg: f64,
        pickup_address: &str,
        evidence: Option<UploadedFile>,
    ) -> Result<WasteRequest, WorkflowError> {
        if weight_kg < 0.0 {
            return Err(WorkflowError::Validation(
                "weight cannot be negative".to_string(),
            ));
        }
        if pickup_address.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "pickup address is required".to_string(),
            ));
        }

        let image_ref = match evidence.filter(|file| !file.is_empty()) {
            Some(file) => Some(self.files.store(&self.upload.user_folder, &file)?),
            None => None,
        };

        let stored = self.requests.insert(NewWasteRequest {
            user_id,
            zone_id,
            waste_type: waste_type.trim().to_string(),
            weight_kg,
            status: RequestStatus::Created,
            pickup_address: pickup_address.trim().to_string(),
            reward_points: 0,
            image_ref,
            created_at: Utc::now(),
        })?;
        info!(request = %stored.id, user = %user_id, "pickup request created");
        Ok(stored)
    }

    /// Admin-only: assign or reassign a collector. Permitted while the
    /// request is unassigned or assigned-but-not-started; a `Created` request
    /// advances to `Assigned` as a side effect.
    pub fn assign_collector(
        &self,
        request_id: RequestId,
        collector_id: CollectorId,
        actor: &Actor,
    ) -> Result<WasteRequest, WorkflowError> {
        if !actor.can_assign() {
            return Err(WorkflowError::Forbidden(
                "only admins can assign collectors".to_string(),
            ));
        }

        let mut request = self
            .requests
            .fetch(request_id)?
            .ok_or(WorkflowError::RequestNotFound(request_id))?;
        self.collectors
            .find(collector_id)?
            .ok_or(WorkflowError::CollectorNotFound(collector_id))?;

        let status = request.status;
        if status.is_terminal() {
            return Err(WorkflowError::Validation(
                "cannot assign a completed or closed request".to_string(),
            ));
        }

        let unassigned = request.collector_id.is_none() || status == RequestStatus::Created;
        let assigned_not_started = status == RequestStatus::Assigned;
        if !unassigned && !assigned_not_started {
            return Err(WorkflowError::InvalidTransition {
                from: status,
                to: RequestStatus::Assigned,
            });
        }

        request.collector_id = Some(collector_id);
        if status == RequestStatus::Created {
            request.status = RequestStatus::Assigned;
        }
        let stored = self.requests.update(request)?;
        info!(request = %stored.id, collector = %collector_id, "collector assigned");
        Ok(stored)
    }

    /// Move a request along the lifecycle on behalf of its assigned
    /// collector. Exactly the `InProgress -> Collected` edge stamps the
    /// collection time and credits the reward ledger before returning.
    ///
    /// The ledger credit commits before the request row is persisted. If the
    /// final `update` fails, the points are already in the ledger and a retry
    /// reports `AlreadyCredited` without re-crediting; the ledger, not the
    /// cached `reward_points` field, is authoritative after such a failure.
    pub fn update_status(
        &self,
        request_id: RequestId,
        target: &str,
        actor: &Actor,
        proof: Option<UploadedFile>,
    ) -> Result<WasteRequest, WorkflowError> {
        let mut request = self
            .requests
            .fetch(request_id)?
            .ok_or(WorkflowError::RequestNotFound(request_id))?;

        let current = request.status;
        let target = RequestStatus::parse(target)?;
        self.authorize_transition(actor, &request, current, target)?;

        request.status = target;

        if let Some(file) = proof.filter(|file| !file.is_empty()) {
            request.collector_proof_ref =
                Some(self.files.store(&self.upload.proof_folder, &file)?);
        }

        if current == RequestStatus::InProgress && target == RequestStatus::Collected {
            request.collected_time = Some(Utc::now());
            match self.rewards.credit_collection(
                request.user_id,
                request.id,
                &request.waste_type,
            )? {
                CreditOutcome::Applied { points, .. } => {
                    request.reward_points = points;
                }
                CreditOutcome::AlreadyCredited => {
                    warn!(request = %request.id, "duplicate collection credit suppressed");
                }
            }
        }

        let stored = self.requests.update(request)?;
        info!(
            request = %stored.id,
            from = %current,
            to = %target,
            "request status updated"
        );
        Ok(stored)
    }

    /// Store a proof-of-collection reference without touching the lifecycle.
    /// Admins may do this for audit purposes; collectors only on their own
    /// assigned request.
    pub fn upload_proof(
        &self,
        request_id: RequestId,
        proof: UploadedFile,
        actor: &Actor,
    ) -> Result<WasteRequest, WorkflowError> {
        if proof.is_empty() {
            return Err(WorkflowError::Validation(
                "proof file is required".to_string(),
            ));
        }

        let mut request = self
            .requests
            .fetch(request_id)?
            .ok_or(WorkflowError::RequestNotFound(request_id))?;
        self.authorize_proof_upload(actor, &request)?;

        request.collector_proof_ref = Some(self.files.store(&self.upload.proof_folder, &proof)?);
        Ok(self.requests.update(request)?)
    }

    /// Requests still in the early or mid lifecycle for longer than the given
    /// number of hours. Advisory flagging only; never mutates state.
    pub fn delayed_requests(&self, hours_threshold: i64) -> Result<Vec<WasteRequest>, WorkflowError> {
        let cutoff = Utc::now() - Duration::hours(hours_threshold);
        let delayed = self
            .requests
            .all()?
            .into_iter()
            .filter(|request| !request.status.is_terminal() && request.created_at < cutoff)
            .collect::<Vec<_>>();
        debug!(count = delayed.len(), hours_threshold, "delayed requests scanned");
        Ok(delayed)
    }

    pub fn requests_for_user(&self, user: UserId) -> Result<Vec<WasteRequest>, WorkflowError> {
        Ok(self.requests.for_user(user)?)
    }

    pub fn requests_for_collector(
        &self,
        collector: CollectorId,
    ) -> Result<Vec<WasteRequest>, WorkflowError> {
        Ok(self.requests.for_collector(collector)?)
    }

    /// Admin monitoring read over every request.
    pub fn all_requests(&self) -> Result<Vec<WasteRequest>, WorkflowError> {
        Ok(self.requests.all()?)
    }

    fn authorize_transition(
        &self,
        actor: &Actor,
        request: &WasteRequest,
        current: RequestStatus,
        target: RequestStatus,
    ) -> Result<(), WorkflowError> {
        let collector_id = match actor.role {
            ActorRole::User => {
                return Err(WorkflowError::Forbidden(
                    "users cannot modify request status".to_string(),
                ))
            }
            ActorRole::Admin => {
                return Err(WorkflowError::Forbidden(
                    "admins monitor requests but do not move them".to_string(),
                ))
            }
            ActorRole::Collector { collector_id } => collector_id,
        };

        if request.collector_id != Some(collector_id) {
            return Err(WorkflowError::Forbidden(
                "request is not assigned to this collector".to_string(),
            ));
        }
        if !current.collector_may_move(target) {
            return Err(WorkflowError::InvalidTransition {
                from: current,
                to: target,
            });
        }
        Ok(())
    }

    fn authorize_proof_upload(
        &self,
        actor: &Actor,
        request: &WasteRequest,
    ) -> Result<(), WorkflowError> {
        if actor.is_admin() {
            return Ok(());
        }
        match actor.collector_id() {
            Some(collector_id) if request.collector_id == Some(collector_id) => Ok(()),
            Some(_) => Err(WorkflowError::Forbidden(
                "request is not assigned to this collector".to_string(),
            )),
            None => Err(WorkflowError::Forbidden(
                "only collectors or admins can upload proof".to_string(),
            )),
        }
    }
}

/// Error raised by the pickup workflow.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{0}")]
    Validation(String),
    #[error("request not found: {0}")]
    RequestNotFound(RequestId),
    #[error("collector not found: {0}")]
    CollectorNotFound(CollectorId),
    #[error("{0}")]
    Forbidden(String),
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },
    #[error(transparent)]
    Status(#[from] StatusParseError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Reward(#[from] RewardError),
}
