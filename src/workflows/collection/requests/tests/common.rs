use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::UploadConfig;
use crate::workflows::collection::domain::{
    Actor, CollectorId, CollectorProfile, RequestId, StoredFileRef, UploadedFile, UserId,
    WasteRequest,
};
use crate::workflows::collection::requests::repository::{
    CollectorDirectory, FileStore, NewWasteRequest, RepositoryError, StorageError,
    WasteRequestRepository,
};
use crate::workflows::collection::requests::service::WasteRequestService;
use crate::workflows::collection::rewards::service::{
    CollectionRewards, CreditOutcome, RewardError,
};

pub(super) fn admin() -> Actor {
    Actor::admin(UserId(900), "ops@curbside.test")
}

pub(super) fn resident(id: u64) -> Actor {
    Actor::user(UserId(id), format!("resident-{id}@curbside.test"))
}

pub(super) fn crew(collector_id: u64) -> Actor {
    Actor::collector(
        UserId(300 + collector_id),
        CollectorId(collector_id),
        format!("crew-{collector_id}@curbside.test"),
    )
}

pub(super) fn upload(name: &str) -> UploadedFile {
    UploadedFile::new(name, b"jpeg bytes".to_vec())
}

pub(super) type Service =
    WasteRequestService<MemoryRequests, MemoryCollectors, MemoryFiles, RecordingRewards>;

pub(super) fn service() -> (
    Service,
    Arc<MemoryRequests>,
    Arc<MemoryCollectors>,
    Arc<MemoryFiles>,
    Arc<RecordingRewards>,
) {
    let requests = Arc::new(MemoryRequests::default());
    let collectors = Arc::new(MemoryCollectors::default());
    collectors.add(CollectorId(7), "North crew");
    collectors.add(CollectorId(8), "South crew");
    let files = Arc::new(MemoryFiles::default());
    let rewards = Arc::new(RecordingRewards::default());
    let service = WasteRequestService::new(
        requests.clone(),
        collectors.clone(),
        files.clone(),
        rewards.clone(),
        UploadConfig::default(),
    );
    (service, requests, collectors, files, rewards)
}

#[derive(Default)]
pub(super) struct MemoryRequests {
    next_id: Mutex<u64>,
    pub(super) records: Mutex<HashMap<RequestId, WasteRequest>>,
}

impl MemoryRequests {
    pub(super) fn get(&self, id: RequestId) -> WasteRequest {
        self.records
            .lock()
            .expect("request mutex poisoned")
            .get(&id)
            .cloned()
            .expect("request present")
    }

    pub(super) fn backdate(&self, id: RequestId, created_at: chrono::DateTime<chrono::Utc>) {
        let mut records = self.records.lock().expect("request mutex poisoned");
        records
            .get_mut(&id)
            .expect("request present")
            .created_at = created_at;
    }
}

impl WasteRequestRepository for MemoryRequests {
    fn insert(&self, request: NewWasteRequest) -> Result<WasteRequest, RepositoryError> {
        let mut next_id = self.next_id.lock().expect("id mutex poisoned");
        *next_id += 1;
        let stored = WasteRequest {
            id: RequestId(*next_id),
            user_id: request.user_id,
            collector_id: None,
            zone_id: request.zone_id,
            waste_type: request.waste_type,
            weight_kg: request.weight_kg,
            status: request.status,
            pickup_address: request.pickup_address,
            scheduled_time: None,
            collected_time: None,
            reward_points: request.reward_points,
            image_ref: request.image_ref,
            collector_proof_ref: None,
            created_at: request.created_at,
        };
        self.records
            .lock()
            .expect("request mutex poisoned")
            .insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn update(&self, request: WasteRequest) -> Result<WasteRequest, RepositoryError> {
        let mut records = self.records.lock().expect("request mutex poisoned");
        if !records.contains_key(&request.id) {
            return Err(RepositoryError::NotFound);
        }
        records.insert(request.id, request.clone());
        Ok(request)
    }

    fn fetch(&self, id: RequestId) -> Result<Option<WasteRequest>, RepositoryError> {
        let records = self.records.lock().expect("request mutex poisoned");
        Ok(records.get(&id).cloned())
    }

    fn all(&self) -> Result<Vec<WasteRequest>, RepositoryError> {
        let records = self.records.lock().expect("request mutex poisoned");
        Ok(records.values().cloned().collect())
    }

    fn for_user(&self, user: UserId) -> Result<Vec<WasteRequest>, RepositoryError> {
        let records = self.records.lock().expect("request mutex poisoned");
        Ok(records
            .values()
            .filter(|request| request.user_id == user)
            .cloned()
            .collect())
    }

    fn for_collector(&self, collector: CollectorId) -> Result<Vec<WasteRequest>, RepositoryError> {
        let records = self.records.lock().expect("request mutex poisoned");
        Ok(records
            .values()
            .filter(|request| request.collector_id == Some(collector))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryCollectors {
    profiles: Mutex<HashMap<CollectorId, CollectorProfile>>,
}

impl MemoryCollectors {
    pub(super) fn add(&self, id: CollectorId, name: &str) {
        self.profiles.lock().expect("collector mutex poisoned").insert(
            id,
            CollectorProfile {
                id,
                name: name.to_string(),
                email: format!("crew-{id}@curbside.test"),
            },
        );
    }
}

impl CollectorDirectory for MemoryCollectors {
    fn find(&self, id: CollectorId) -> Result<Option<CollectorProfile>, RepositoryError> {
        let profiles = self.profiles.lock().expect("collector mutex poisoned");
        Ok(profiles.get(&id).cloned())
    }
}

#[derive(Default)]
pub(super) struct MemoryFiles {
    stored: Mutex<Vec<(String, String)>>,
}

impl MemoryFiles {
    pub(super) fn stored(&self) -> Vec<(String, String)> {
        self.stored.lock().expect("file mutex poisoned").clone()
    }
}

impl FileStore for MemoryFiles {
    fn store(&self, folder: &str, file: &UploadedFile) -> Result<StoredFileRef, StorageError> {
        let location = format!("{folder}/{}", file.name);
        self.stored
            .lock()
            .expect("file mutex poisoned")
            .push((folder.to_string(), file.name.clone()));
        Ok(StoredFileRef(location))
    }
}

/// Stub ledger seam: records credit calls and replays a scripted outcome.
pub(super) struct RecordingRewards {
    outcome: Mutex<CreditOutcome>,
    pub(super) calls: Mutex<Vec<(UserId, RequestId, String)>>,
}

impl Default for RecordingRewards {
    fn default() -> Self {
        Self {
            outcome: Mutex::new(CreditOutcome::Applied {
                points: 10,
                entry: None,
            }),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingRewards {
    pub(super) fn script(&self, outcome: CreditOutcome) {
        *self.outcome.lock().expect("outcome mutex poisoned") = outcome;
    }

    pub(super) fn calls(&self) -> Vec<(UserId, RequestId, String)> {
        self.calls.lock().expect("call mutex poisoned").clone()
    }
}

impl CollectionRewards for RecordingRewards {
    fn credit_collection(
        &self,
        user: UserId,
        request: RequestId,
        waste_type: &str,
    ) -> Result<CreditOutcome, RewardError> {
        self.calls
            .lock()
            .expect("call mutex poisoned")
            .push((user, request, waste_type.to_string()));
        Ok(self.outcome.lock().expect("outcome mutex poisoned").clone())
    }
}
