use std::sync::Arc;

use askama::Template;
use axum::{extract::State, response::Html};

use super::render;
use crate::VERSION;
use crate::error::AppResult;
use crate::models::{LINKS_FILE, Link, SERIAL_COMMANDS_FILE, SerialCommand, load_entries};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    links: &'a [Link],
    version: &'static str,
}

#[derive(Template)]
#[template(path = "seriald.html")]
struct SerialdTemplate<'a> {
    commands: &'a [SerialCommand],
    version: &'static str,
}

pub async fn index_route(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let links: Vec<Link> = load_entries(&state.data_dir, LINKS_FILE).await;
    render(&IndexTemplate {
        links: &links,
        version: VERSION,
    })
}

pub async fn seriald_route(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let commands: Vec<SerialCommand> = load_entries(&state.data_dir, SERIAL_COMMANDS_FILE).await;
    render(&SerialdTemplate {
        commands: &commands,
        version: VERSION,
    })
}
