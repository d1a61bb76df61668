use std::sync::Mutex;

use chrono::Utc;
use entity::{Deal, Stage};
use thiserror::Error;
use uuid::Uuid;

/// Failure taxonomy of the deal store.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("resource not found")]
    NotFound,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("transient store failure: {0}")]
    Transient(String),
}

/// Persistence contract the engine consumes. The authoritative store lives
/// outside this crate; [`MemoryDealStore`] stands in for tests and the demo
/// binary.
#[allow(async_fn_in_trait)]
pub trait DealStore {
    async fn list_deals(&self, pipeline_id: Uuid) -> Result<Vec<Deal>, StoreError>;
    async fn list_stages(&self, pipeline_id: Uuid) -> Result<Vec<Stage>, StoreError>;
    async fn move_deal_to_stage(&self, deal_id: Uuid, stage_id: Uuid) -> Result<(), StoreError>;
}

/// In-memory deal store with scripted one-shot failures and a record of
/// every move call it receives.
#[derive(Debug, Default)]
pub struct MemoryDealStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    deals: Vec<Deal>,
    stages: Vec<Stage>,
    move_calls: Vec<(Uuid, Uuid)>,
    fail_next_move: Option<StoreError>,
    fail_next_load: Option<StoreError>,
}

impl MemoryDealStore {
    pub fn new(deals: Vec<Deal>, stages: Vec<Stage>) -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                deals,
                stages,
                ..MemoryInner::default()
            }),
        }
    }

    /// Script the next `move_deal_to_stage` call to fail with `err`.
    pub fn fail_next_move(&self, err: StoreError) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_next_move = Some(err);
        }
    }

    /// Script the next `list_deals` call to fail with `err`.
    pub fn fail_next_load(&self, err: StoreError) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_next_load = Some(err);
        }
    }

    /// Every `(deal_id, stage_id)` pair passed to `move_deal_to_stage`,
    /// including calls that were scripted to fail.
    pub fn move_calls(&self) -> Vec<(Uuid, Uuid)> {
        self.inner
            .lock()
            .map(|inner| inner.move_calls.clone())
            .unwrap_or_default()
    }

    /// Replace a stored deal wholesale, as an out-of-band server-side edit.
    pub fn upsert_deal(&self, deal: Deal) {
        if let Ok(mut inner) = self.inner.lock() {
            match inner.deals.iter_mut().find(|d| d.id == deal.id) {
                Some(existing) => *existing = deal,
                None => inner.deals.push(deal),
            }
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryInner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Transient("store mutex poisoned".into()))
    }
}

impl DealStore for MemoryDealStore {
    async fn list_deals(&self, pipeline_id: Uuid) -> Result<Vec<Deal>, StoreError> {
        let mut inner = self.lock()?;
        if let Some(err) = inner.fail_next_load.take() {
            return Err(err);
        }
        Ok(inner
            .deals
            .iter()
            .filter(|deal| deal.pipeline_id == pipeline_id)
            .cloned()
            .collect())
    }

    async fn list_stages(&self, pipeline_id: Uuid) -> Result<Vec<Stage>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .stages
            .iter()
            .filter(|stage| stage.pipeline_id == pipeline_id)
            .cloned()
            .collect())
    }

    async fn move_deal_to_stage(&self, deal_id: Uuid, stage_id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.move_calls.push((deal_id, stage_id));
        if let Some(err) = inner.fail_next_move.take() {
            return Err(err);
        }
        let stage = inner
            .stages
            .iter()
            .find(|stage| stage.id == stage_id)
            .cloned()
            .ok_or(StoreError::NotFound)?;
        let deal = inner
            .deals
            .iter_mut()
            .find(|deal| deal.id == deal_id)
            .ok_or(StoreError::NotFound)?;
        if deal.pipeline_id != stage.pipeline_id {
            return Err(StoreError::Validation(
                "stage belongs to a different pipeline".into(),
            ));
        }
        if deal.stage_id != stage.id {
            let now = Utc::now();
            deal.stage_id = stage.id;
            deal.probability = stage.probability;
            deal.last_stage_change_at = now;
            deal.updated_at = now;
            deal.rotting_days = 0;
        }
        Ok(())
    }
}
