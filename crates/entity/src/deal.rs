use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sales opportunity tracked through pipeline stages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub id: Uuid,
    pub title: String,
    /// Monetary amount in minor units, never negative.
    pub amount: i64,
    /// Close probability in percent (0-100). Mirrors the probability of the
    /// deal's current stage; manual overrides are not supported.
    pub probability: i16,
    pub stage_id: Uuid,
    pub pipeline_id: Uuid,
    pub owner_id: Uuid,
    pub account_id: Option<Uuid>,
    pub status: DealStatus,
    pub expected_close_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Rotting basis, maintained by the deal store on every stage change.
    pub last_stage_change_at: DateTime<Utc>,
    pub tags: BTreeSet<String>,
    /// Store policy requires this to be set before a transition to `Lost`.
    pub lost_reason: Option<String>,
    /// Days since the last stage change, precomputed by the deal store.
    /// Meaningful only while the deal is open.
    pub rotting_days: u32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    Open,
    Won,
    Lost,
}

impl Deal {
    /// Amount scaled by close probability, used for forecasting.
    ///
    /// Derived on demand so it can never drift from `amount`/`probability`.
    pub fn weighted_amount(&self) -> i64 {
        weighted_amount(self.amount, self.probability)
    }
}

/// `round(amount * probability / 100)` in integer arithmetic (half-up).
pub fn weighted_amount(amount: i64, probability: i16) -> i64 {
    (amount * i64::from(probability) + 50) / 100
}
