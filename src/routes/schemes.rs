use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::Scheme;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SchemeRequest {
    pub name: String,
    pub monthly_charge: i64,
    pub monthly_reward_text: String,
}

/// Public: the scheme catalog is browsable without a login.
pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Scheme>>, AppError> {
    let schemes = db::schemes::list(&state.pool).await?;
    Ok(Json(schemes))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<SchemeRequest>,
) -> Result<Json<Scheme>, AppError> {
    auth.require_admin()?;
    validate(&req)?;

    let scheme = db::schemes::create(
        &state.pool,
        &req.name,
        req.monthly_charge,
        &req.monthly_reward_text,
    )
    .await?;

    Ok(Json(scheme))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SchemeRequest>,
) -> Result<Json<Scheme>, AppError> {
    auth.require_admin()?;
    validate(&req)?;

    let scheme = db::schemes::update(
        &state.pool,
        id,
        &req.name,
        req.monthly_charge,
        &req.monthly_reward_text,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Scheme not found".to_string()))?;

    Ok(Json(scheme))
}

fn validate(req: &SchemeRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Scheme name is required".to_string()));
    }
    if req.monthly_charge < 0 {
        return Err(AppError::BadRequest(
            "Monthly charge cannot be negative".to_string(),
        ));
    }
    Ok(())
}
