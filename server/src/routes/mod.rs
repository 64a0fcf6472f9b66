use axum::{routing::get, Router};

use crate::app_state::SharedState;

pub mod auth;
pub mod timeline;


/// Every dynamic route. Static files are served by the caller's fallback.
pub fn router(app_state: &SharedState) -> Router<SharedState> {
    Router::new()
        .route("/", get(timeline::get_index))
        .route("/api/timeline", get(timeline::get_timeline))
        .route("/auth/google/login", get(auth::get_login))
        .route(app_state.oauth.redirect_path(), get(auth::get_callback))
}
