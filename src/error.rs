use askama::Template;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use thiserror::Error;
use tracing::{error, info};

use crate::VERSION;
use crate::library::LibraryError;
use crate::media::MediaError;
use crate::session::{self, LOGIN_PATH};

const GENERIC_MESSAGE: &str = "The media server could not complete the request.";

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    title: &'a str,
    message: &'a str,
    version: &'static str,
}

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("session rejected by the media server")]
    SessionRejected,

    #[error("library not found: {0}")]
    LibraryNotFound(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(MediaError),

    #[error("{0}")]
    Internal(String),
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        if err.is_session_rejected() {
            AppError::SessionRejected
        } else if err.status() == Some(StatusCode::NOT_FOUND) {
            AppError::NotFound("Item not found".to_string())
        } else {
            AppError::Upstream(err)
        }
    }
}

impl From<LibraryError> for AppError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::Media(err) => err.into(),
            LibraryError::Storage(err) => AppError::Internal(format!("{err:#}")),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Internal(format!("failed to render template: {err}"))
    }
}

fn error_page(status: StatusCode, title: &str, message: &str) -> Response {
    let template = ErrorTemplate {
        title,
        message,
        version: VERSION,
    };
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            error!(%err, "failed to render error page");
            (status, message.to_string()).into_response()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::SessionRejected => {
                info!("media server rejected the session, clear cookies");
                (session::clear(CookieJar::new()), Redirect::to(LOGIN_PATH)).into_response()
            }
            AppError::LibraryNotFound(collection_type) => {
                let msg = format!(
                    "library not found: no \"{collection_type}\" library is known yet, refresh the library list and try again"
                );
                error_page(StatusCode::NOT_FOUND, "Library not found", &msg)
            }
            AppError::NotFound(msg) => error_page(StatusCode::NOT_FOUND, "Not found", &msg),
            AppError::Upstream(err) => {
                error!(%err, status = ?err.status(), "upstream request failed");
                error_page(StatusCode::INTERNAL_SERVER_ERROR, "Error", GENERIC_MESSAGE)
            }
            AppError::Internal(msg) => {
                error!(%msg, "internal error");
                error_page(StatusCode::INTERNAL_SERVER_ERROR, "Error", GENERIC_MESSAGE)
            }
        }
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;
