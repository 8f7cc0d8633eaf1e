//! Template view models.
//!
//! Upstream fields are optional; absent ones render as empty strings.

use crate::media::{MediaItem, User};

const TICKS_PER_MINUTE: i64 = 600_000_000;

fn runtime(ticks: Option<i64>) -> String {
    let minutes = match ticks {
        Some(t) if t > 0 => t / TICKS_PER_MINUTE,
        _ => return String::new(),
    };
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, m) => format!("{h}h {m}m"),
    }
}

fn or_empty<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Movie, show or any other listed item
#[derive(Clone, Debug, Default)]
pub struct ItemCard {
    pub id: String,
    pub name: String,
    pub year: String,
    pub rating: String,
    pub runtime: String,
    pub overview: String,
    pub genres: String,
}

impl From<&MediaItem> for ItemCard {
    fn from(item: &MediaItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            year: or_empty(item.production_year),
            rating: or_empty(item.official_rating.as_deref()),
            runtime: runtime(item.run_time_ticks),
            overview: or_empty(item.overview.as_deref()),
            genres: item.genres.join(", "),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct EpisodeRow {
    pub id: String,
    pub code: String,
    pub name: String,
    pub runtime: String,
    pub overview: String,
}

impl From<&MediaItem> for EpisodeRow {
    fn from(item: &MediaItem) -> Self {
        let code = match (item.parent_index_number, item.index_number) {
            (Some(season), Some(episode)) => format!("S{season:02}E{episode:02}"),
            (None, Some(episode)) => format!("E{episode:02}"),
            _ => String::new(),
        };
        Self {
            id: item.id.clone(),
            code,
            name: item.name.clone(),
            runtime: runtime(item.run_time_ticks),
            overview: or_empty(item.overview.as_deref()),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub server_name: String,
    pub last_login: String,
    pub last_activity: String,
    pub administrator: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            server_name: or_empty(user.server_name.as_deref()),
            last_login: or_empty(user.last_login_date.as_deref()),
            last_activity: or_empty(user.last_activity_date.as_deref()),
            administrator: user.policy.as_ref().is_some_and(|p| p.is_administrator),
        }
    }
}

/// Cached library shown on the dashboard, `href` is empty when no page browses it
#[derive(Clone, Debug, Default)]
pub struct LibraryEntry {
    pub collection_type: String,
    pub href: String,
}
