use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named step in a pipeline with an associated close probability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: Uuid,
    pub pipeline_id: Uuid,
    pub name: String,
    /// Close probability in percent (0-100).
    pub probability: i16,
    pub color: String,
    /// Ordinal position within its pipeline.
    pub position: i16,
}
