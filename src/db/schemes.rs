use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Scheme;

pub async fn create(
    pool: &PgPool,
    name: &str,
    monthly_charge: i64,
    monthly_reward_text: &str,
) -> Result<Scheme, sqlx::Error> {
    sqlx::query_as::<_, Scheme>(
        "INSERT INTO schemes (name, monthly_charge, monthly_reward_text)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(name)
    .bind(monthly_charge)
    .bind(monthly_reward_text)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Scheme>, sqlx::Error> {
    sqlx::query_as::<_, Scheme>("SELECT * FROM schemes ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Scheme>, sqlx::Error> {
    sqlx::query_as::<_, Scheme>("SELECT * FROM schemes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    monthly_charge: i64,
    monthly_reward_text: &str,
) -> Result<Option<Scheme>, sqlx::Error> {
    sqlx::query_as::<_, Scheme>(
        "UPDATE schemes SET name = $2, monthly_charge = $3, monthly_reward_text = $4
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(monthly_charge)
    .bind(monthly_reward_text)
    .fetch_optional(pool)
    .await
}
