use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Member, MemberAccount};

const ACCOUNT_COLUMNS: &str = "m.id, m.user_id, m.member_id, u.email, u.first_name, u.last_name,
     m.joined_at, m.scheme_id, s.name AS scheme_name, s.monthly_charge, s.monthly_reward_text";

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    member_id: &str,
    scheme_id: Option<Uuid>,
) -> Result<Member, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        "INSERT INTO members (user_id, member_id, scheme_id)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(user_id)
    .bind(member_id)
    .bind(scheme_id)
    .fetch_one(executor)
    .await
}

/// Resolve an external member identifier. This is the single lookup every
/// operator-facing form goes through; callers map `None` to a NotFound
/// validation error.
pub async fn find_by_member_id<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    member_id: &str,
) -> Result<Option<MemberAccount>, sqlx::Error> {
    sqlx::query_as::<_, MemberAccount>(&format!(
        "SELECT {ACCOUNT_COLUMNS}
         FROM members m
         JOIN users u ON u.id = m.user_id
         LEFT JOIN schemes s ON s.id = m.scheme_id
         WHERE m.member_id = $1"
    ))
    .bind(member_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_by_user_id(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<MemberAccount>, sqlx::Error> {
    sqlx::query_as::<_, MemberAccount>(&format!(
        "SELECT {ACCOUNT_COLUMNS}
         FROM members m
         JOIN users u ON u.id = m.user_id
         LEFT JOIN schemes s ON s.id = m.scheme_id
         WHERE m.user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<MemberAccount>, sqlx::Error> {
    sqlx::query_as::<_, MemberAccount>(&format!(
        "SELECT {ACCOUNT_COLUMNS}
         FROM members m
         JOIN users u ON u.id = m.user_id
         LEFT JOIN schemes s ON s.id = m.scheme_id
         ORDER BY m.joined_at"
    ))
    .fetch_all(pool)
    .await
}

pub async fn update_scheme(
    pool: &PgPool,
    id: Uuid,
    scheme_id: Option<Uuid>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE members SET scheme_id = $2 WHERE id = $1")
        .bind(id)
        .bind(scheme_id)
        .execute(pool)
        .await?;
    Ok(())
}
