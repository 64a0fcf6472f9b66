use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use eyre;
use plusfeed_core::timeline::{RenderError, TimelineError};

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    err: eyre::Error,
}

impl HttpError {
    pub fn new(status: StatusCode, err: impl Into<eyre::Error>) -> Self {
        HttpError {
            status,
            err: err.into(),
        }
    }
}

// Tell axum how to convert `HttpError` into a response.
impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "{:?}", self.err);
        }
        (self.status, format!("{}", self.err)).into_response()
    }
}

macro_rules! impl_from {
    ($from:ty, $status:expr) => {
        impl From<$from> for HttpError {
            fn from(err: $from) -> Self {
                Self::new($status, err)
            }
        }
    };
}

impl_from!(color_eyre::Report, StatusCode::INTERNAL_SERVER_ERROR);
impl_from!(RenderError, StatusCode::INTERNAL_SERVER_ERROR);

impl From<TimelineError> for HttpError {
    fn from(err: TimelineError) -> Self {
        let status = match &err {
            TimelineError::Auth(_) => StatusCode::UNAUTHORIZED,
            TimelineError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, err)
    }
}

pub type ApiResult<T> = Result<T, HttpError>;

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.err)
    }
}
