use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use http::header;

use super::render;
use crate::VERSION;
use crate::error::{AppError, AppResult};
use crate::media::is_item_id;
use crate::models::ItemCard;
use crate::session::Session;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "play.html")]
struct PlayTemplate<'a> {
    item: &'a ItemCard,
    stream_url: &'a str,
    version: &'static str,
}

/// The page embeds the session token in the stream URL, so it is neither cached nor sent as a referrer
const PLAY_HEADERS: [(header::HeaderName, &str); 2] = [
    (header::CACHE_CONTROL, "no-store"),
    (header::REFERRER_POLICY, "no-referrer"),
];

pub async fn play_route(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    if !is_item_id(&id) {
        return Err(AppError::NotFound("Item not found".to_string()));
    }
    let item = state.client.get_item(&session, &id).await?;
    let stream_url = state.client.stream_url(&session, &id);
    let html = render(&PlayTemplate {
        item: &ItemCard::from(&item),
        stream_url: &stream_url,
        version: VERSION,
    })?;
    Ok((PLAY_HEADERS, html))
}
