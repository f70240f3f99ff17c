use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::auth::extractor::AuthUser;
use crate::billing::BillingMonth;
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "dashboard/admin.html")]
#[allow(dead_code)]
struct AdminDashboardTemplate {
    current_month: String,
    members: Vec<MemberRow>,
}

#[allow(dead_code)]
struct MemberRow {
    member_id: String,
    name: String,
    email: String,
    scheme: String,
    joined: String,
}

#[derive(Template)]
#[template(path = "dashboard/member.html")]
#[allow(dead_code)]
struct MemberHomeTemplate {
    member_id: String,
    name: String,
    scheme: String,
    monthly_charge: i64,
    unlocked_rewards: i64,
}

pub async fn admin_dashboard(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Response, AppError> {
    if !auth.is_admin {
        return Ok(Redirect::to("/home").into_response());
    }

    let members = db::members::list_all(&state.pool).await?;

    let rows = members
        .iter()
        .map(|m| MemberRow {
            member_id: m.member_id.clone(),
            name: m.full_name(),
            email: m.email.clone(),
            scheme: m.scheme_name.clone().unwrap_or_else(|| "—".to_string()),
            joined: m.joined_at.format("%Y-%m-%d").to_string(),
        })
        .collect();

    let template = AdminDashboardTemplate {
        current_month: BillingMonth::current().to_string(),
        members: rows,
    };
    Ok(Html(template.render().unwrap_or_default()).into_response())
}

pub async fn member_home(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Response, AppError> {
    let Some(member) = db::members::find_by_user_id(&state.pool, auth.user_id).await? else {
        // Admins have no member profile
        return Ok(Redirect::to("/dashboard").into_response());
    };

    let unlocked = db::rewards::count_by_member(&state.pool, member.id).await?;

    let template = MemberHomeTemplate {
        member_id: member.member_id.clone(),
        name: member.full_name(),
        scheme: member
            .scheme_name
            .clone()
            .unwrap_or_else(|| "No Scheme Assigned".to_string()),
        monthly_charge: member.monthly_charge.unwrap_or(0),
        unlocked_rewards: unlocked,
    };
    Ok(Html(template.render().unwrap_or_default()).into_response())
}
