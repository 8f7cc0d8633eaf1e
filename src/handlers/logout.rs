use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};

use crate::session::{self, LOGIN_PATH, Session};
use crate::state::AppState;

/// Revoke the token upstream when possible, always drop the cookies
pub async fn logout_route(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    if let Some(session) = Session::from_jar(&jar) {
        match state.client.logout(&session).await {
            Ok(()) => info!(user_id = session.user_id(), "logged out"),
            Err(err) => warn!(%err, "failed to revoke session upstream"),
        }
    }
    (session::clear(jar), Redirect::to(LOGIN_PATH))
}
