use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One month's billing obligation for a member. `charge_month` is always the
/// first day of the month; at most one row exists per (member, month).
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Charge {
    pub id: Uuid,
    pub member_id: Uuid,
    pub charge_month: NaiveDate,
    pub amount: i64,
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Ledger view row: a charge joined with the member it bills.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct LedgerRow {
    pub id: Uuid,
    pub member_id: String,
    pub member_name: String,
    pub charge_month: NaiveDate,
    pub amount: i64,
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
}
