use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::MediaItem;

pub const MOVIES: &str = "movies";
pub const TV_SHOWS: &str = "tvshows";

/// Collection type to upstream library ID, replaced as a whole on refresh
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryMap {
    #[serde(default)]
    pub libraries: BTreeMap<String, String>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl LibraryMap {
    /// Views without a collection type or an ID are left out, a later view wins over an earlier one
    pub fn from_views(views: &[MediaItem], refreshed_at: DateTime<Utc>) -> Self {
        let libraries = views
            .iter()
            .filter(|view| !view.id.is_empty())
            .filter_map(|view| {
                view.collection_type
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .map(|t| (t.to_string(), view.id.clone()))
            })
            .collect();
        Self {
            libraries,
            refreshed_at: Some(refreshed_at),
        }
    }

    pub fn get(&self, collection_type: &str) -> Option<&str> {
        self.libraries.get(collection_type).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(id: &str, collection_type: Option<&str>) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            name: id.to_uppercase(),
            collection_type: collection_type.map(str::to_string),
            ..MediaItem::default()
        }
    }

    #[test]
    fn views_without_collection_type_are_excluded() {
        let views = [
            view("lib-movies", Some(MOVIES)),
            view("lib-shows", Some(TV_SHOWS)),
            view("lib-playlists", None),
            view("lib-empty", Some("")),
        ];
        let map = LibraryMap::from_views(&views, Utc::now());
        assert_eq!(2, map.len());
        assert_eq!(Some("lib-movies"), map.get(MOVIES));
        assert_eq!(Some("lib-shows"), map.get(TV_SHOWS));
        assert_eq!(None, map.get("playlists"));
    }

    #[test]
    fn views_without_id_are_excluded() {
        let map = LibraryMap::from_views(&[view("", Some(MOVIES))], Utc::now());
        assert!(map.is_empty());
        assert_eq!(None, map.get(MOVIES));
    }

    #[test]
    fn later_view_wins() {
        let views = [view("first", Some(MOVIES)), view("second", Some(MOVIES))];
        let map = LibraryMap::from_views(&views, Utc::now());
        assert_eq!(Some("second"), map.get(MOVIES));
    }

    #[test]
    fn empty_map() {
        let map = LibraryMap::default();
        assert!(map.is_empty());
        assert!(map.refreshed_at.is_none());
        assert_eq!(None, map.get(MOVIES));
    }
}
