use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{Charge, MemberAccount, Reward};
use crate::state::SharedState;

#[derive(Serialize)]
pub struct ProfileResponse {
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub scheme_name: Option<String>,
    pub monthly_charge: Option<i64>,
    pub unlocked_rewards: i64,
}

async fn own_member(state: &SharedState, auth: &AuthUser) -> Result<MemberAccount, AppError> {
    db::members::find_by_user_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No member profile for this account".to_string()))
}

pub async fn profile(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let member = own_member(&state, &auth).await?;
    let unlocked_rewards = db::rewards::count_by_member(&state.pool, member.id).await?;

    Ok(Json(ProfileResponse {
        member_id: member.member_id.clone(),
        name: member.full_name(),
        email: member.email.clone(),
        scheme_name: member.scheme_name.clone(),
        monthly_charge: member.monthly_charge,
        unlocked_rewards,
    }))
}

pub async fn charges(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Charge>>, AppError> {
    let member = own_member(&state, &auth).await?;
    let charges = db::charges::list_by_member(&state.pool, member.id).await?;
    Ok(Json(charges))
}

pub async fn rewards(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Reward>>, AppError> {
    let member = own_member(&state, &auth).await?;
    let rewards = db::rewards::list_by_member(&state.pool, member.id).await?;
    Ok(Json(rewards))
}
