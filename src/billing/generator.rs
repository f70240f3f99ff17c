use serde::Serialize;
use sqlx::PgPool;

use crate::billing::month::BillingMonth;

#[derive(Debug, Serialize)]
pub struct GenerateOutcome {
    pub charges_created: u64,
    pub members_without_scheme: i64,
}

/// Ensure every scheme-enrolled member has exactly one charge row for the
/// given month, unpaid, at the scheme's current charge amount.
///
/// Set-based and idempotent: reruns insert nothing and never touch existing
/// rows, paid or not. Members without a scheme are skipped silently and only
/// surface as a count for operator feedback. Rewards are never created here;
/// they materialize at payment time.
pub async fn generate_charges(
    pool: &PgPool,
    month: BillingMonth,
) -> Result<GenerateOutcome, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO charges (member_id, charge_month, amount)
         SELECT m.id, $1, s.monthly_charge
         FROM members m
         JOIN schemes s ON s.id = m.scheme_id
         ON CONFLICT (member_id, charge_month) DO NOTHING",
    )
    .bind(month.first_day())
    .execute(pool)
    .await?;

    let (members_without_scheme,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM members WHERE scheme_id IS NULL")
            .fetch_one(pool)
            .await?;

    let outcome = GenerateOutcome {
        charges_created: result.rows_affected(),
        members_without_scheme,
    };

    tracing::info!(
        month = %month,
        created = outcome.charges_created,
        skipped = outcome.members_without_scheme,
        "Monthly charge generation complete"
    );

    Ok(outcome)
}
