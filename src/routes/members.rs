use axum::extract::{Path, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::password;
use crate::auth::tokens::{generate_token, hash_token};
use crate::db;
use crate::error::AppError;
use crate::models::{generate_member_id, MemberAccount};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateMember {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub scheme_id: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct AssignScheme {
    pub scheme_id: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct UpdateMember {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Every route that accepts a human-typed Member ID resolves it here, so the
/// failure mode is identical across the whole admin surface.
pub(crate) async fn resolve_member(
    pool: &PgPool,
    member_id: &str,
) -> Result<MemberAccount, AppError> {
    db::members::find_by_member_id(pool, member_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No member found with that Member ID".to_string()))
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<MemberAccount>>, AppError> {
    auth.require_admin()?;
    let members = db::members::list_all(&state.pool).await?;
    Ok(Json(members))
}

/// Admin provisioning: creates the login identity with a random unusable
/// password, the member record with a generated Member ID, and emails a
/// password setup link.
pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateMember>,
) -> Result<Json<MemberAccount>, AppError> {
    auth.require_admin()?;

    if req.email.trim().is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }

    if let Some(scheme_id) = req.scheme_id {
        db::schemes::find_by_id(&state.pool, scheme_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Scheme not found".to_string()))?;
    }

    // Nobody knows this password; the member sets their own via the link.
    let pw_hash = password::hash(&generate_token())?;

    let mut tx = state.pool.begin().await?;

    let user = db::users::create(
        &mut *tx,
        req.email.trim(),
        &pw_hash,
        &req.first_name,
        &req.last_name,
        false,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A user with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    let member = db::members::create(&mut *tx, user.id, &generate_member_id(), req.scheme_id)
        .await?;

    tx.commit().await?;

    issue_setup_token(&state, user.id, &user.email).await?;

    let account = resolve_member(&state.pool, &member.member_id).await?;
    Ok(Json(account))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(member_id): Path<String>,
) -> Result<Json<MemberAccount>, AppError> {
    auth.require_admin()?;
    let member = resolve_member(&state.pool, &member_id).await?;
    Ok(Json(member))
}

/// Admin edit of a member's contact details. The Member ID itself is
/// immutable; scheme assignment has its own endpoint.
pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(member_id): Path<String>,
    Json(req): Json<UpdateMember>,
) -> Result<Json<MemberAccount>, AppError> {
    auth.require_admin()?;

    if req.email.trim().is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }

    let member = resolve_member(&state.pool, &member_id).await?;

    db::users::update_profile(
        &state.pool,
        member.user_id,
        req.email.trim(),
        &req.first_name,
        &req.last_name,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A user with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    let updated = resolve_member(&state.pool, &member_id).await?;
    Ok(Json(updated))
}

pub async fn update_scheme(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(member_id): Path<String>,
    Json(req): Json<AssignScheme>,
) -> Result<Json<MemberAccount>, AppError> {
    auth.require_admin()?;

    let member = resolve_member(&state.pool, &member_id).await?;

    if let Some(scheme_id) = req.scheme_id {
        db::schemes::find_by_id(&state.pool, scheme_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Scheme not found".to_string()))?;
    }

    db::members::update_scheme(&state.pool, member.id, req.scheme_id).await?;

    let updated = resolve_member(&state.pool, &member_id).await?;
    Ok(Json(updated))
}

/// Re-issue the password setup email, e.g. after the 24-hour window lapsed.
pub async fn send_setup(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(member_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    let member = resolve_member(&state.pool, &member_id).await?;
    issue_setup_token(&state, member.user_id, &member.email).await?;

    Ok(Json(serde_json::json!({ "message": "Password setup email sent" })))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(member_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    let member = resolve_member(&state.pool, &member_id).await?;
    // Deleting the user cascades to the member row and its charges/rewards.
    db::users::delete(&state.pool, member.user_id).await?;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

async fn issue_setup_token(
    state: &SharedState,
    user_id: Uuid,
    email: &str,
) -> Result<(), AppError> {
    let token = generate_token();
    let token_hash = hash_token(&token);

    db::password_setup_tokens::create(
        &state.pool,
        user_id,
        &token_hash,
        Utc::now() + Duration::hours(24),
    )
    .await?;

    let setup_url = format!("{}/set-password?token={token}", state.config.base_url);

    if let Some(ref mailer) = state.system_mailer {
        if let Err(e) = mailer.send_password_setup(email, &setup_url).await {
            tracing::error!("Failed to send password setup email to {email}: {e}");
        }
    } else {
        tracing::warn!("System SMTP not configured. Password setup URL for {email}: {setup_url}");
    }

    Ok(())
}
