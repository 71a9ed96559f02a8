use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Point-in-time record of total asset value. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: Uuid,
    pub total_value: f64,
    pub taken_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(total_value: f64, taken_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            total_value,
            taken_at,
        }
    }
}
