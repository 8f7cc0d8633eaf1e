use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, State},
    response::Html,
};

use super::render;
use crate::VERSION;
use crate::error::{AppError, AppResult};
use crate::media::is_item_id;
use crate::models::UserProfile;
use crate::session::Session;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "user.html")]
struct UserTemplate<'a> {
    user: &'a UserProfile,
    version: &'static str,
}

pub async fn user_route(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    if !is_item_id(&id) {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    let user = state.client.get_user(&session, &id).await?;
    render(&UserTemplate {
        user: &UserProfile::from(&user),
        version: VERSION,
    })
}
