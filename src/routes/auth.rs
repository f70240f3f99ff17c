use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::auth::tokens::hash_token;
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SetPasswordRequest {
    pub token: String,
    pub password: String,
    pub confirm: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn auth_cookie(access_token: &str) -> CookieJar {
    let access = Cookie::build(("access_token", access_token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(12))
        .build();

    CookieJar::new().add(access)
}

fn clear_auth_cookie() -> CookieJar {
    let access = Cookie::build(("access_token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    CookieJar::new().add(access)
}

/// Bootstrap registration: the very first account becomes the administrator.
/// Everyone after that is provisioned by an admin through the members API.
pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }

    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.password)?;

    // Advisory lock prevents concurrent bootstrap registrations
    let mut tx = state.pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock(1)")
        .execute(&mut *tx)
        .await?;

    let count = db::users::count_all(&mut *tx).await?;
    if count > 0 {
        return Err(AppError::Forbidden(
            "Registration is disabled. Contact your administrator.".to_string(),
        ));
    }

    let user = db::users::create(
        &mut *tx,
        &req.email,
        &pw_hash,
        &req.first_name,
        &req.last_name,
        true,
    )
    .await?;

    tx.commit().await?;

    let claims = Claims::new(user.id, true);
    let access_token =
        encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    let jar = auth_cookie(&access_token);
    Ok((jar, Json(AuthResponse { access_token })))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    // Rate limit check
    if state.login_limiter.check(&req.email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let user = db::users::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify(&req.password, &user.password_hash)?;

    if !valid {
        state.login_limiter.record_failure(&req.email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let claims = Claims::new(user.id, user.is_admin);
    let access_token =
        encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    let jar = auth_cookie(&access_token);
    Ok((jar, Json(AuthResponse { access_token })))
}

pub async fn logout() -> (CookieJar, Json<MessageResponse>) {
    (
        clear_auth_cookie(),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Complete the emailed password setup link. An unknown token is NotFound; a
/// known-but-used or expired token is a distinct invalid-link condition.
pub async fn set_password(
    State(state): State<SharedState>,
    Json(req): Json<SetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    if req.password != req.confirm {
        return Err(AppError::BadRequest("Passwords do not match".to_string()));
    }

    let token_hash = hash_token(&req.token);

    let token = db::password_setup_tokens::find_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| AppError::NotFound("Unknown setup token".to_string()))?;

    if !token.is_valid(Utc::now()) {
        return Err(AppError::InvalidToken(
            "This link has already been used or has expired".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.password)?;

    // Password update and token consumption must land together. The
    // conditional consume also settles a race between two requests carrying
    // the same token: only the first writer gets past it.
    let mut tx = state.pool.begin().await?;
    let consumed = db::password_setup_tokens::mark_used(&mut *tx, token.id).await?;
    if !consumed {
        return Err(AppError::InvalidToken(
            "This link has already been used or has expired".to_string(),
        ));
    }
    db::users::update_password(&mut *tx, token.user_id, &pw_hash).await?;
    tx.commit().await?;

    Ok(Json(MessageResponse {
        message: "Password created successfully. Please log in.".to_string(),
    }))
}

pub async fn change_password(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.new_password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let valid = password::verify(&req.current_password, &user.password_hash)?;

    if !valid {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.new_password)?;
    db::users::update_password(&state.pool, user.id, &pw_hash).await?;

    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}
