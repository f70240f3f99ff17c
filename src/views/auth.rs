use askama::Template;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::Deserialize;

use crate::auth::jwt;
use crate::auth::tokens::hash_token;
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {}

#[derive(Template)]
#[template(path = "auth/set_password.html")]
struct SetPasswordTemplate {
    token: String,
}

#[derive(Template)]
#[template(path = "auth/token_invalid.html")]
struct TokenInvalidTemplate {
    message: String,
}

#[derive(Deserialize)]
pub struct SetupQuery {
    pub token: Option<String>,
}

pub async fn login_page(State(state): State<SharedState>, jar: CookieJar) -> Response {
    // If already logged in, go straight to the right dashboard
    if let Some(cookie) = jar.get("access_token") {
        if let Ok(claims) = jwt::decode_token(cookie.value(), &state.config.jwt_secret) {
            let target = if claims.adm { "/dashboard" } else { "/home" };
            return Redirect::to(target).into_response();
        }
    }

    let template = LoginTemplate {};
    Html(template.render().unwrap_or_default()).into_response()
}

/// The emailed setup link lands here. A used or expired token renders the
/// dedicated invalid-link page, never a generic error.
pub async fn set_password_page(
    State(state): State<SharedState>,
    Query(q): Query<SetupQuery>,
) -> Result<Response, AppError> {
    let Some(token) = q.token.filter(|t| !t.is_empty()) else {
        return Ok(token_invalid_page(
            StatusCode::NOT_FOUND,
            "This link is missing its setup token.",
        ));
    };

    let Some(stored) = db::password_setup_tokens::find_by_hash(&state.pool, &hash_token(&token))
        .await?
    else {
        return Ok(token_invalid_page(
            StatusCode::NOT_FOUND,
            "This setup link is not recognized.",
        ));
    };

    if !stored.is_valid(Utc::now()) {
        return Ok(token_invalid_page(
            StatusCode::GONE,
            "This setup link has already been used or has expired.",
        ));
    }

    let template = SetPasswordTemplate { token };
    Ok(Html(template.render().unwrap_or_default()).into_response())
}

fn token_invalid_page(status: StatusCode, message: &str) -> Response {
    let template = TokenInvalidTemplate {
        message: message.to_string(),
    };
    (status, Html(template.render().unwrap_or_default())).into_response()
}
