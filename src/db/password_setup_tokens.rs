use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::PasswordSetupToken;

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<PasswordSetupToken, sqlx::Error> {
    sqlx::query_as::<_, PasswordSetupToken>(
        "INSERT INTO password_setup_tokens (user_id, token_hash, expires_at)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(user_id)
    .bind(token_hash)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

/// Find by hash without filtering on validity; callers apply the validity
/// predicate so that used/expired tokens can be reported distinctly from
/// unknown ones.
pub async fn find_by_hash(
    pool: &PgPool,
    token_hash: &str,
) -> Result<Option<PasswordSetupToken>, sqlx::Error> {
    sqlx::query_as::<_, PasswordSetupToken>(
        "SELECT * FROM password_setup_tokens WHERE token_hash = $1",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await
}

/// Consume the token. Returns false when another request consumed it first;
/// the `used = false` guard makes the consume first-writer-wins.
pub async fn mark_used<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE password_setup_tokens SET used = true WHERE id = $1 AND used = false")
            .bind(id)
            .execute(executor)
            .await?;
    Ok(result.rows_affected() == 1)
}
