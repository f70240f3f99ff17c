pub mod auth;
pub mod billing;
pub mod me;
pub mod members;
pub mod reports;
pub mod schemes;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/set-password", post(auth::set_password))
        .route("/api/v1/auth/change-password", post(auth::change_password))
        // Schemes
        .route("/api/v1/schemes", get(schemes::list).post(schemes::create))
        .route("/api/v1/schemes/{id}", put(schemes::update))
        // Members
        .route("/api/v1/members", get(members::list).post(members::create))
        .route(
            "/api/v1/members/{member_id}",
            get(members::get).put(members::update).delete(members::delete),
        )
        .route("/api/v1/members/{member_id}/scheme", put(members::update_scheme))
        .route(
            "/api/v1/members/{member_id}/send-setup",
            post(members::send_setup),
        )
        // Billing
        .route("/api/v1/billing/generate", post(billing::generate))
        .route("/api/v1/billing/settle", post(billing::settle))
        .route("/api/v1/billing/settle-batch", post(billing::settle_batch))
        .route("/api/v1/billing/charges", get(billing::charges))
        .route("/api/v1/billing/rewards", get(billing::rewards))
        // Member self-service
        .route("/api/v1/me", get(me::profile))
        .route("/api/v1/me/charges", get(me::charges))
        .route("/api/v1/me/rewards", get(me::rewards))
        // Reports
        .route(
            "/api/v1/reports/members-summary",
            get(reports::members_summary),
        )
        .route("/api/v1/reports/members", get(reports::members_list))
        .route(
            "/api/v1/reports/members/{member_id}",
            get(reports::member_summary),
        )
}
