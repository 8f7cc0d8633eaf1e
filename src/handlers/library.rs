use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, State},
    response::Html,
};
use tracing::debug;

use super::render;
use crate::VERSION;
use crate::error::{AppError, AppResult};
use crate::library::{MOVIES, TV_SHOWS};
use crate::media::is_item_id;
use crate::models::{EpisodeRow, ItemCard};
use crate::session::Session;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "library.html")]
struct LibraryTemplate<'a> {
    title: &'a str,
    items: &'a [ItemCard],
    item_prefix: &'a str,
    version: &'static str,
}

#[derive(Template)]
#[template(path = "show.html")]
struct ShowTemplate<'a> {
    show: &'a ItemCard,
    episodes: &'a [EpisodeRow],
    version: &'static str,
}

/// A library absent from the cache never reaches upstream
async fn list_library(
    state: &AppState,
    session: &Session,
    collection_type: &str,
    item_type: &str,
) -> AppResult<Vec<ItemCard>> {
    let parent_id = state
        .libraries
        .get(collection_type)
        .ok_or_else(|| AppError::LibraryNotFound(collection_type.to_string()))?;
    let list = state
        .client
        .list_items(session, &parent_id, item_type)
        .await?;
    debug!(collection_type, items = list.items.len(), "listed library");
    Ok(list.items.iter().map(ItemCard::from).collect())
}

pub async fn movies_route(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> AppResult<Html<String>> {
    let items = list_library(&state, &session, MOVIES, "Movie").await?;
    render(&LibraryTemplate {
        title: "Movies",
        items: &items,
        item_prefix: "/mediamanager/play",
        version: VERSION,
    })
}

pub async fn shows_route(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> AppResult<Html<String>> {
    let items = list_library(&state, &session, TV_SHOWS, "Series").await?;
    render(&LibraryTemplate {
        title: "Shows",
        items: &items,
        item_prefix: "/mediamanager/shows",
        version: VERSION,
    })
}

pub async fn show_route(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    if !is_item_id(&id) {
        return Err(AppError::NotFound("Show not found".to_string()));
    }
    let (show, episodes) = tokio::try_join!(
        state.client.get_item(&session, &id),
        state.client.list_episodes(&session, &id),
    )?;
    let episodes: Vec<EpisodeRow> = episodes.items.iter().map(EpisodeRow::from).collect();
    render(&ShowTemplate {
        show: &ItemCard::from(&show),
        episodes: &episodes,
        version: VERSION,
    })
}
