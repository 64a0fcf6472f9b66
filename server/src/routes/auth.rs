use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{info, instrument, warn, Instrument};

use crate::{app_state::SharedState, http_error::ApiResult};

/// Sends the browser to the provider's consent page
pub async fn get_login(State(app_state): State<SharedState>) -> ApiResult<Redirect> {
    let url = app_state.oauth.authorization_url()?;
    Ok(Redirect::to(url.as_str()))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// The provider redirects here after login. Trades the code for a credential and starts a
/// session; any failure answers 404.
#[instrument(skip_all)]
pub async fn get_callback(
    State(app_state): State<SharedState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let code = match (query.code, query.error) {
        (Some(code), None) => code,
        (_, error) => {
            warn!(?error, "login was not completed");
            return StatusCode::NOT_FOUND.into_response();
        }
    };
    match app_state.oauth.exchange_code(&code).in_current_span().await {
        Ok(cred) => {
            let session_id = app_state.sessions.create(cred).await;
            info!("Logged in new session");
            let jar = app_state.session_cookie.jar_with_session(session_id);
            (jar, Redirect::to("/")).into_response()
        }
        Err(err) => {
            warn!("code exchange failed: {:?}", err);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
