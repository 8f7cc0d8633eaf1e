use std::sync::Arc;

use axum::{Json, extract::State};

use crate::error::AppResult;
use crate::library::LibraryMap;
use crate::session::Session;
use crate::state::AppState;

/// Explicit refresh of the library map
pub async fn views_route(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> AppResult<Json<LibraryMap>> {
    let map = state.libraries.refresh(&state.client, &session).await?;
    Ok(Json(map))
}
