pub mod auth;
pub mod dashboard;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        // Auth views
        .route("/", get(auth::login_page))
        .route("/auth/login", get(auth::login_page))
        .route("/set-password", get(auth::set_password_page))
        // Dashboards
        .route("/dashboard", get(dashboard::admin_dashboard))
        .route("/home", get(dashboard::member_home))
}
