use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use eyre::Context;
use plusfeed_core::timeline::{sort_timeline, TimelineError};
use tracing::{debug, instrument, Instrument};

use crate::{app_state::SharedState, http_error::ApiResult, schema::timeline::TimelineResponse};

async fn landing_page(app_state: &SharedState) -> ApiResult<Response> {
    let path = app_state.doc_root.join("index.html");
    let html = tokio::fs::read_to_string(&path)
        .await
        .wrap_err_with(|| format!("error reading {}", path))?;
    Ok(Html(html).into_response())
}

/// The rendered timeline, or the landing page when not logged in
#[instrument(skip_all)]
pub async fn get_index(
    State(app_state): State<SharedState>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let session = app_state.session_cookie.session(&headers);
    match app_state.aggregator.build(&session).in_current_span().await {
        Ok(entries) => {
            let list = app_state.renderer.render(entries)?;
            Ok(Html(app_state.pages.timeline_page(&list)?).into_response())
        }
        Err(TimelineError::Auth(err)) => {
            debug!(%err, "serving landing page");
            landing_page(&app_state).await
        }
        Err(err) => Err(err.into()),
    }
}

#[instrument(skip_all)]
pub async fn get_timeline(
    State(app_state): State<SharedState>,
    headers: HeaderMap,
) -> ApiResult<Json<TimelineResponse>> {
    let now = Utc::now();
    let session = app_state.session_cookie.session(&headers);
    let mut entries = app_state
        .aggregator
        .build(&session)
        .in_current_span()
        .await?;
    sort_timeline(&mut entries);
    Ok(Json(TimelineResponse { date: now, entries }))
}
