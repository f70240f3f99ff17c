use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Reward, RewardLedgerRow};

/// Insert or overwrite the reward for one (member, month). Returns true when
/// a new row was inserted, false when an existing row's text was overwritten.
pub async fn upsert<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    member_id: Uuid,
    reward_month: NaiveDate,
    reward_text: &str,
) -> Result<bool, sqlx::Error> {
    // xmax = 0 distinguishes a fresh insert from a conflict-update.
    let row: (bool,) = sqlx::query_as(
        "INSERT INTO rewards (member_id, reward_month, reward_text)
         VALUES ($1, $2, $3)
         ON CONFLICT (member_id, reward_month)
         DO UPDATE SET reward_text = EXCLUDED.reward_text
         RETURNING (xmax = 0)",
    )
    .bind(member_id)
    .bind(reward_month)
    .bind(reward_text)
    .fetch_one(executor)
    .await?;
    Ok(row.0)
}

pub async fn list_by_member(
    pool: &PgPool,
    member_id: Uuid,
) -> Result<Vec<Reward>, sqlx::Error> {
    sqlx::query_as::<_, Reward>(
        "SELECT * FROM rewards WHERE member_id = $1 ORDER BY reward_month DESC",
    )
    .bind(member_id)
    .fetch_all(pool)
    .await
}

pub async fn ledger(
    pool: &PgPool,
    reward_month: Option<NaiveDate>,
) -> Result<Vec<RewardLedgerRow>, sqlx::Error> {
    sqlx::query_as::<_, RewardLedgerRow>(
        "SELECT r.id, m.member_id,
                trim(u.first_name || ' ' || u.last_name) AS member_name,
                r.reward_month, r.reward_text, r.created_at
         FROM rewards r
         JOIN members m ON m.id = r.member_id
         JOIN users u ON u.id = m.user_id
         WHERE $1::date IS NULL OR r.reward_month = $1
         ORDER BY r.reward_month DESC, m.member_id",
    )
    .bind(reward_month)
    .fetch_all(pool)
    .await
}

pub async fn count_by_member(pool: &PgPool, member_id: Uuid) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rewards WHERE member_id = $1")
        .bind(member_id)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}
