use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Charge, LedgerRow};

/// Lock the charge row for one (member, month) for the duration of the
/// enclosing transaction. Serializes concurrent settles on the same key.
pub async fn find_for_update(
    conn: &mut sqlx::PgConnection,
    member_id: Uuid,
    charge_month: NaiveDate,
) -> Result<Option<Charge>, sqlx::Error> {
    sqlx::query_as::<_, Charge>(
        "SELECT * FROM charges WHERE member_id = $1 AND charge_month = $2 FOR UPDATE",
    )
    .bind(member_id)
    .bind(charge_month)
    .fetch_optional(conn)
    .await
}

/// Insert the charge row unless one already exists for the (member, month)
/// key. Returns None when a concurrent writer got there first; the insert
/// waits on the in-flight row rather than surfacing a unique violation, so
/// the enclosing transaction stays usable.
pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    member_id: Uuid,
    charge_month: NaiveDate,
    amount: i64,
    paid: bool,
) -> Result<Option<Charge>, sqlx::Error> {
    sqlx::query_as::<_, Charge>(
        "INSERT INTO charges (member_id, charge_month, amount, paid, paid_at)
         VALUES ($1, $2, $3, $4, CASE WHEN $4 THEN now() END)
         ON CONFLICT (member_id, charge_month) DO NOTHING
         RETURNING *",
    )
    .bind(member_id)
    .bind(charge_month)
    .bind(amount)
    .bind(paid)
    .fetch_optional(executor)
    .await
}

pub async fn mark_paid<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE charges SET paid = true, paid_at = COALESCE(paid_at, now()) WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn list_by_member(
    pool: &PgPool,
    member_id: Uuid,
) -> Result<Vec<Charge>, sqlx::Error> {
    sqlx::query_as::<_, Charge>(
        "SELECT * FROM charges WHERE member_id = $1 ORDER BY charge_month DESC",
    )
    .bind(member_id)
    .fetch_all(pool)
    .await
}

pub async fn ledger(
    pool: &PgPool,
    charge_month: Option<NaiveDate>,
) -> Result<Vec<LedgerRow>, sqlx::Error> {
    sqlx::query_as::<_, LedgerRow>(
        "SELECT c.id, m.member_id,
                trim(u.first_name || ' ' || u.last_name) AS member_name,
                c.charge_month, c.amount, c.paid, c.paid_at
         FROM charges c
         JOIN members m ON m.id = c.member_id
         JOIN users u ON u.id = m.user_id
         WHERE $1::date IS NULL OR c.charge_month = $1
         ORDER BY c.charge_month DESC, m.member_id",
    )
    .bind(charge_month)
    .fetch_all(pool)
    .await
}
