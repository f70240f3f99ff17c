use serde::Serialize;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::billing::month::BillingMonth;
use crate::db;

#[derive(Debug, Serialize)]
pub struct PaymentOutcome {
    pub charge_created: bool,
    pub reward_created: bool,
    pub already_paid: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct SettlementOutcome {
    pub charges_created: u64,
    pub rewards_created: u64,
    pub skipped: u64,
}

/// Mark one member's charge for `month` as paid and unlock the matching
/// reward, atomically. The member must have a scheme; callers enforce that
/// before getting here.
pub async fn settle(
    pool: &PgPool,
    member_uuid: Uuid,
    month: BillingMonth,
    amount: i64,
    reward_text: &str,
) -> Result<PaymentOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let outcome = settle_in_tx(&mut tx, member_uuid, month, amount, reward_text).await?;
    tx.commit().await?;
    Ok(outcome)
}

/// One settle step inside an open transaction. The row lock taken by
/// `find_for_update` plus the (member_id, charge_month) unique key serialize
/// concurrent settles for the same member and month.
///
/// An already-paid charge is a no-op: the reward was written on the original
/// unpaid-to-paid transition and is not rewritten.
pub async fn settle_in_tx(
    conn: &mut PgConnection,
    member_uuid: Uuid,
    month: BillingMonth,
    amount: i64,
    reward_text: &str,
) -> Result<PaymentOutcome, sqlx::Error> {
    let existing = db::charges::find_for_update(&mut *conn, member_uuid, month.first_day()).await?;

    match existing {
        Some(charge) if charge.paid => Ok(PaymentOutcome {
            charge_created: false,
            reward_created: false,
            already_paid: true,
        }),
        Some(charge) => {
            db::charges::mark_paid(&mut *conn, charge.id).await?;
            let reward_created =
                db::rewards::upsert(&mut *conn, member_uuid, month.first_day(), reward_text)
                    .await?;
            Ok(PaymentOutcome {
                charge_created: false,
                reward_created,
                already_paid: false,
            })
        }
        None => {
            // The generator has not run for this month yet; create the
            // charge directly as paid. A concurrent settle can beat us to
            // the insert, in which case its paid row already exists and
            // this one reports the same no-op as the paid branch above.
            let inserted =
                db::charges::create(&mut *conn, member_uuid, month.first_day(), amount, true)
                    .await?;
            if inserted.is_none() {
                return Ok(PaymentOutcome {
                    charge_created: false,
                    reward_created: false,
                    already_paid: true,
                });
            }
            let reward_created =
                db::rewards::upsert(&mut *conn, member_uuid, month.first_day(), reward_text)
                    .await?;
            Ok(PaymentOutcome {
                charge_created: true,
                reward_created,
                already_paid: false,
            })
        }
    }
}

/// Operator bulk action: settle a set of external member IDs for one month
/// in a single transaction. IDs that do not resolve, or that resolve to
/// members without a scheme, are skipped and counted. The result carries
/// counts only, no per-member detail.
pub async fn settle_batch(
    pool: &PgPool,
    member_ids: &[String],
    month: BillingMonth,
) -> Result<SettlementOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut outcome = SettlementOutcome::default();

    for external_id in member_ids {
        let Some(member) = db::members::find_by_member_id(&mut *tx, external_id).await? else {
            outcome.skipped += 1;
            continue;
        };

        let (Some(amount), Some(reward_text)) =
            (member.monthly_charge, member.monthly_reward_text.as_deref())
        else {
            outcome.skipped += 1;
            continue;
        };

        let result = settle_in_tx(&mut tx, member.id, month, amount, reward_text).await?;
        if result.charge_created {
            outcome.charges_created += 1;
        }
        if result.reward_created {
            outcome.rewards_created += 1;
        }
    }

    tx.commit().await?;

    tracing::info!(
        month = %month,
        charges = outcome.charges_created,
        rewards = outcome.rewards_created,
        skipped = outcome.skipped,
        "Batch settlement complete"
    );

    Ok(outcome)
}
