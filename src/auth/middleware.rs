use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use super::config::AuthCheck;
use crate::media::{MediaError, User};
use crate::session::{self, LOGIN_PATH, Session};
use crate::state::AppState;

/// Authentication state after checking the session cookies, the user is
/// only known when the liveness check fetched it
enum AuthState {
    Missing,
    Valid(Session, Option<User>),
    Rejected(MediaError),
}

/// Validate the session cookies according to the configured check
async fn authenticate(state: &AppState, jar: &CookieJar) -> AuthState {
    let session = match Session::from_jar(jar) {
        None => return AuthState::Missing,
        Some(session) => session,
    };
    match state.auth_check {
        AuthCheck::Presence => AuthState::Valid(session, None),
        AuthCheck::Liveness => match state.client.get_user(&session, session.user_id()).await {
            Ok(user) => AuthState::Valid(session, Some(user)),
            Err(err) => AuthState::Rejected(err),
        },
    }
}

/// Axum middleware guarding the media manager routes
pub async fn auth_middleware_fn(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, &jar).await {
        AuthState::Valid(session, user) => {
            request.extensions_mut().insert(session);
            if let Some(user) = user {
                request.extensions_mut().insert(user);
            }
            next.run(request).await
        }
        AuthState::Missing => {
            debug!(path = %request.uri().path(), "no session, redirect to login");
            Redirect::to(LOGIN_PATH).into_response()
        }
        AuthState::Rejected(err) => {
            warn!(%err, "session failed liveness check, clear cookies");
            (session::clear(jar), Redirect::to(LOGIN_PATH)).into_response()
        }
    }
}
