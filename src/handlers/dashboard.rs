use std::sync::Arc;

use askama::Template;
use axum::{Extension, extract::State, response::Html};

use super::render;
use crate::VERSION;
use crate::error::AppResult;
use crate::library::{MOVIES, TV_SHOWS};
use crate::media::User;
use crate::models::{LibraryEntry, UserProfile};
use crate::session::Session;
use crate::state::AppState;

pub const DASHBOARD_PATH: &str = "/mediamanager";

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate<'a> {
    user: &'a UserProfile,
    libraries: &'a [LibraryEntry],
    refreshed_at: String,
    version: &'static str,
}

fn browse_path(collection_type: &str) -> &'static str {
    match collection_type {
        MOVIES => "/mediamanager/movies",
        TV_SHOWS => "/mediamanager/shows",
        _ => "",
    }
}

pub async fn dashboard_route(
    State(state): State<Arc<AppState>>,
    session: Session,
    checked: Option<Extension<User>>,
) -> AppResult<Html<String>> {
    // the liveness check already fetched the session user
    let user = match checked {
        Some(Extension(user)) => user,
        None => state.client.get_user(&session, session.user_id()).await?,
    };
    let map = state.libraries.snapshot();
    let libraries: Vec<LibraryEntry> = map
        .libraries
        .keys()
        .map(|collection_type| LibraryEntry {
            collection_type: collection_type.clone(),
            href: browse_path(collection_type).to_string(),
        })
        .collect();
    render(&DashboardTemplate {
        user: &UserProfile::from(&user),
        libraries: &libraries,
        refreshed_at: map
            .refreshed_at
            .map(|t| t.to_rfc2822())
            .unwrap_or_default(),
        version: VERSION,
    })
}
