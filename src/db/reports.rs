use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use serde::Serialize;
use uuid::Uuid;

/// Accumulation summary: paid charges and received rewards per member.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct MemberSummaryRow {
    pub name: String,
    pub member_id: String,
    pub scheme: String,
    pub joined_at: DateTime<Utc>,
    pub charges_paid: i64,
    pub rewards_received: i64,
}

/// Members directory row with the most recent reward month.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct MemberListRow {
    pub name: String,
    pub member_id: String,
    pub scheme: String,
    pub email: String,
    pub last_reward: Option<NaiveDate>,
}

const SUMMARY_SELECT: &str = "
    SELECT trim(u.first_name || ' ' || u.last_name) AS name,
           m.member_id,
           COALESCE(s.name, '') AS scheme,
           m.joined_at,
           (SELECT COUNT(*) FROM charges c WHERE c.member_id = m.id AND c.paid) AS charges_paid,
           (SELECT COUNT(*) FROM rewards r WHERE r.member_id = m.id) AS rewards_received
    FROM members m
    JOIN users u ON u.id = m.user_id
    LEFT JOIN schemes s ON s.id = m.scheme_id";

pub async fn members_summary(pool: &PgPool) -> Result<Vec<MemberSummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, MemberSummaryRow>(&format!("{SUMMARY_SELECT} ORDER BY m.joined_at"))
        .fetch_all(pool)
        .await
}

pub async fn member_summary(
    pool: &PgPool,
    member_uuid: Uuid,
) -> Result<Option<MemberSummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, MemberSummaryRow>(&format!("{SUMMARY_SELECT} WHERE m.id = $1"))
        .bind(member_uuid)
        .fetch_optional(pool)
        .await
}

pub async fn members_list(pool: &PgPool) -> Result<Vec<MemberListRow>, sqlx::Error> {
    sqlx::query_as::<_, MemberListRow>(
        "SELECT trim(u.first_name || ' ' || u.last_name) AS name,
                m.member_id,
                COALESCE(s.name, '') AS scheme,
                u.email,
                (SELECT MAX(r.reward_month) FROM rewards r WHERE r.member_id = m.id) AS last_reward
         FROM members m
         JOIN users u ON u.id = m.user_id
         LEFT JOIN schemes s ON s.id = m.scheme_id
         ORDER BY m.joined_at",
    )
    .fetch_all(pool)
    .await
}
