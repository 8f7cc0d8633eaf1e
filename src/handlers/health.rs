use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Deserialize, Serialize)]
pub struct Healthz {
    pub libraries: usize,
    pub refreshed_at: Option<i64>,
}

pub async fn healthz_route(State(state): State<Arc<AppState>>) -> Json<Healthz> {
    let map = state.libraries.snapshot();
    Json(Healthz {
        libraries: map.len(),
        refreshed_at: map.refreshed_at.map(|t| t.timestamp_millis()),
    })
}
