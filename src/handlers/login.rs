use std::sync::Arc;

use askama::Template;
use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use serde::Deserialize;
use tracing::{info, warn};

use super::dashboard::DASHBOARD_PATH;
use super::render;
use crate::VERSION;
use crate::error::AppResult;
use crate::media::MediaError;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate<'a> {
    error: &'a str,
    username: &'a str,
    version: &'static str,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

fn login_page(status: StatusCode, error: &str, username: &str) -> AppResult<Response> {
    let html = render(&LoginTemplate {
        error,
        username,
        version: VERSION,
    })?;
    Ok((status, html).into_response())
}

pub async fn login_form_route() -> AppResult<Html<String>> {
    render(&LoginTemplate {
        error: "",
        username: "",
        version: VERSION,
    })
}

/// Authenticate upstream, store the session cookies and refresh the library map
pub async fn login_route(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if form.username.is_empty() {
        return login_page(StatusCode::UNAUTHORIZED, "Username is required", "");
    }
    let session = match state.client.authenticate(&form.username, &form.password).await {
        Ok(session) => session,
        Err(MediaError::Auth(reason)) => {
            info!(username = %form.username, %reason, "login rejected");
            return login_page(
                StatusCode::UNAUTHORIZED,
                "Invalid username or password",
                &form.username,
            );
        }
        Err(err) => return Err(err.into()),
    };
    // a failed refresh leaves the previous map, the dashboard offers a manual refresh
    if let Err(err) = state.libraries.refresh(&state.client, &session).await {
        warn!(%err, "failed to refresh libraries after login");
    }
    info!(user_id = session.user_id(), "logged in");
    let jar = session.store(jar, state.secure_cookies);
    Ok((jar, Redirect::to(DASHBOARD_PATH)).into_response())
}
