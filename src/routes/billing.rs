use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::billing::{self, BillingMonth};
use crate::db;
use crate::error::AppError;
use crate::models::{LedgerRow, RewardLedgerRow};
use crate::routes::members::resolve_member;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub month: Option<BillingMonth>,
}

#[derive(Deserialize)]
pub struct SettleRequest {
    pub member_id: String,
    #[serde(default)]
    pub month: Option<BillingMonth>,
}

#[derive(Deserialize)]
pub struct SettleBatchRequest {
    pub member_ids: Vec<String>,
    #[serde(default)]
    pub month: Option<BillingMonth>,
}

#[derive(Deserialize)]
pub struct LedgerParams {
    pub month: Option<String>,
}

/// Defaulting to the invocation-time month happens only here, at the
/// boundary; the generator itself always takes the month explicitly.
pub async fn generate(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<billing::GenerateOutcome>, AppError> {
    auth.require_admin()?;

    let month = req.month.unwrap_or_else(BillingMonth::current);
    let outcome = billing::generate_charges(&state.pool, month).await?;
    Ok(Json(outcome))
}

pub async fn settle(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<SettleRequest>,
) -> Result<Json<billing::PaymentOutcome>, AppError> {
    auth.require_admin()?;

    let month = req.month.unwrap_or_else(BillingMonth::current);
    let member = resolve_member(&state.pool, &req.member_id).await?;

    let (Some(amount), Some(reward_text)) =
        (member.monthly_charge, member.monthly_reward_text.as_deref())
    else {
        return Err(AppError::BadRequest(
            "Member has no scheme assigned".to_string(),
        ));
    };

    let outcome = billing::settle(&state.pool, member.id, month, amount, reward_text).await?;
    Ok(Json(outcome))
}

pub async fn settle_batch(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<SettleBatchRequest>,
) -> Result<Json<billing::SettlementOutcome>, AppError> {
    auth.require_admin()?;

    let month = req.month.unwrap_or_else(BillingMonth::current);
    let outcome = billing::settle_batch(&state.pool, &req.member_ids, month).await?;
    Ok(Json(outcome))
}

pub async fn charges(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<LedgerParams>,
) -> Result<Json<Vec<LedgerRow>>, AppError> {
    auth.require_admin()?;

    let month = parse_month_filter(params.month.as_deref())?;
    let rows = db::charges::ledger(&state.pool, month.map(|m| m.first_day())).await?;
    Ok(Json(rows))
}

pub async fn rewards(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<LedgerParams>,
) -> Result<Json<Vec<RewardLedgerRow>>, AppError> {
    auth.require_admin()?;

    let month = parse_month_filter(params.month.as_deref())?;
    let rows = db::rewards::ledger(&state.pool, month.map(|m| m.first_day())).await?;
    Ok(Json(rows))
}

fn parse_month_filter(month: Option<&str>) -> Result<Option<BillingMonth>, AppError> {
    month
        .map(|s| {
            s.parse::<BillingMonth>()
                .map_err(|_| AppError::BadRequest(format!("Invalid month '{s}', expected YYYY-MM")))
        })
        .transpose()
}
