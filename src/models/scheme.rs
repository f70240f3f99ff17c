use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subscription tier. Shared reference data; reward text is copied into
/// reward rows at payment time, so editing it here only affects future
/// payments.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Scheme {
    pub id: Uuid,
    pub name: String,
    pub monthly_charge: i64,
    pub monthly_reward_text: String,
    pub created_at: DateTime<Utc>,
}
