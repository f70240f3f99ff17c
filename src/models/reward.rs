use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Benefit unlocked by paying a month's charge. `reward_text` is captured
/// from the scheme at payment time.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Reward {
    pub id: Uuid,
    pub member_id: Uuid,
    pub reward_month: NaiveDate,
    pub reward_text: String,
    pub created_at: DateTime<Utc>,
}

/// Ledger view row: a reward joined with the member it belongs to.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct RewardLedgerRow {
    pub id: Uuid,
    pub member_id: String,
    pub member_name: String,
    pub reward_month: NaiveDate,
    pub reward_text: String,
    pub created_at: DateTime<Utc>,
}
