use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::config::RewardConfig;
use super::domain::{
    CatalogItem, Redemption, RedemptionId, RewardId, RewardTransaction,
};
use super::repository::{CreditInsert, RewardCatalog, RewardStore, RewardStoreError};
use crate::workflows::collection::domain::{Actor, RequestId, UserId};

/// Outcome of a collection credit as seen by the pickup workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditOutcome {
    /// The credit applied; `entry` is `None` when the waste type earned zero
    /// points and no ledger entry was warranted.
    Applied {
        points: u32,
        entry: Option<RewardTransaction>,
    },
    /// This request was already credited; balance and ledger untouched.
    AlreadyCredited,
}

/// Seam the pickup workflow uses to trigger crediting on the collected edge.
pub trait CollectionRewards: Send + Sync {
    fn credit_collection(
        &self,
        user: UserId,
        request: RequestId,
        waste_type: &str,
    ) -> Result<CreditOutcome, RewardError>;
}

/// The reward-points ledger: credits collections, debits redemptions, and
/// tracks redemption fulfillment against the same balance.
pub struct RewardLedger<S, C> {
    store: Arc<S>,
    catalog: Arc<C>,
    config: RewardConfig,
}

impl<S, C> RewardLedger<S, C>
where
    S: RewardStore + 'static,
    C: RewardCatalog + 'static,
{
    pub fn new(store: Arc<S>, catalog: Arc<C>, config: RewardConfig) -> Self {
        Self {
            store,
            catalog,
            config,
        }
    }

    /// Credit the owner of a collected request exactly once.
    ///
    /// Idempotency rides on the store's conditional insert keyed by the
    /// request id, so concurrent duplicate submissions collapse to a single
    /// credit.
    pub fn credit_for_collection(
        &self,
        user: UserId,
        request: RequestId,
        waste_type: &str,
    ) -> Result<CreditOutcome, RewardError> {
        let points = self.config.points_for(waste_type);
        if points == 0 {
            debug!(%request, waste_type, "no points earned; skipping ledger entry");
            return Ok(CreditOutcome::Applied {
                points: 0,
                entry: None,
            });
        }

        let description = format!(
            "Waste request #{request} ({waste_type}) collected - {points} points"
        );
        match self.store.credit_once(user, request, points, &description)? {
            CreditInsert::Inserted(entry) => {
                info!(%user, %request, points, "collection credit applied");
                Ok(CreditOutcome::Applied {
                    points,
                    entry: Some(entry),
                })
            }
            CreditInsert::Duplicate => {
                debug!(%user, %request, "collection already credited; no-op");
                Ok(CreditOutcome::AlreadyCredited)
            }
        }
    }

    /// Redeem a catalog reward for the acting resident.
    ///
    /// The debit, the `Redeem` ledger entry, and the `Requested` redemption
    /// row commit as one unit inside the store.
    pub fn redeem(&self, reward_id: RewardId, actor: &Actor) -> Result<Redemption, RewardError> {
        if !actor.can_redeem() {
            return Err(RewardError::Forbidden(
                "only regular users can redeem rewards".to_string(),
            ));
        }

        let reward = self
            .catalog
            .find(reward_id)?
            .ok_or(RewardError::RewardNotFound(reward_id))?;

        if !reward.active {
            return Err(RewardError::Validation(
                "reward is not currently available for redemption".to_string(),
            ));
        }
        // A cost outside u32 would silently truncate on cast and slip past
        // the balance check, so out-of-range values are rejected outright.
        let required = match u32::try_from(reward.points_required) {
            Ok(points) if points > 0 => points,
            _ => {
                return Err(RewardError::Validation(
                    "invalid points required for reward".to_string(),
                ))
            }
        };

        let description = format!("Redeemed '{}' (reward #{})", reward.name, reward.id);
        match self
            .store
            .debit_for_redemption(actor.user_id, reward.id, required, &description)
        {
            Ok(redemption) => {
                info!(
                    user = %actor.user_id,
                    reward = %reward.id,
                    points = required,
                    "redemption requested"
                );
                Ok(redemption)
            }
            Err(RewardStoreError::InsufficientPoints {
                required,
                available,
            }) => Err(RewardError::InsufficientPoints {
                required,
                available,
            }),
            Err(other) => Err(other.into()),
        }
    }

    /// Mark a redemption fulfilled. The balance was already debited at
    /// redemption time; repeating the call returns the record unchanged.
    pub fn fulfill_redemption(
        &self,
        redemption_id: RedemptionId,
        actor: &Actor,
    ) -> Result<Redemption, RewardError> {
        if !actor.can_fulfill() {
            return Err(RewardError::Forbidden(
                "only admins can fulfill redemptions".to_string(),
            ));
        }

        match self.store.fulfill(redemption_id, Utc::now()) {
            Ok(redemption) => {
                info!(redemption = %redemption.id, "redemption fulfilled");
                Ok(redemption)
            }
            Err(RewardStoreError::RedemptionNotFound) => {
                Err(RewardError::RedemptionNotFound(redemption_id))
            }
            Err(other) => Err(other.into()),
        }
    }

    pub fn balance(&self, user: UserId) -> Result<u32, RewardError> {
        Ok(self.store.balance(user)?)
    }

    pub fn transactions_for_user(
        &self,
        user: UserId,
    ) -> Result<Vec<RewardTransaction>, RewardError> {
        Ok(self.store.transactions_for(user)?)
    }

    pub fn redemptions_for_user(&self, user: UserId) -> Result<Vec<Redemption>, RewardError> {
        Ok(self.store.redemptions_for(user)?)
    }

    pub fn all_redemptions(&self) -> Result<Vec<Redemption>, RewardError> {
        Ok(self.store.all_redemptions()?)
    }

    pub fn active_catalog(&self) -> Result<Vec<CatalogItem>, RewardError> {
        Ok(self.catalog.active_items()?)
    }
}

impl<S, C> CollectionRewards for RewardLedger<S, C>
where
    S: RewardStore + 'static,
    C: RewardCatalog + 'static,
{
    fn credit_collection(
        &self,
        user: UserId,
        request: RequestId,
        waste_type: &str,
    ) -> Result<CreditOutcome, RewardError> {
        self.credit_for_collection(user, request, waste_type)
    }
}

/// Error raised by the reward ledger.
#[derive(Debug, thiserror::Error)]
pub enum RewardError {
    #[error("{0}")]
    Forbidden(String),
    #[error("reward not found: {0}")]
    RewardNotFound(RewardId),
    #[error("redemption not found: {0}")]
    RedemptionNotFound(RedemptionId),
    #[error("{0}")]
    Validation(String),
    #[error("insufficient points: required {required}, available {available}")]
    InsufficientPoints { required: u32, available: u32 },
    #[error(transparent)]
    Store(#[from] RewardStoreError),
}
