use chrono::Utc;
use parking_lot::RwLock;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::map::LibraryMap;
use super::repository::{AnyRepository, LibraryRepository as _};
use crate::media::{MediaClient, MediaError};
use crate::session::Session;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("failed to persist library map: {0:#}")]
    Storage(anyhow::Error),
}

/// In-process copy of the persisted library map.
///
/// Lookups never touch storage or the network; the read/write lock is never
/// held across an await. `persist` serializes save and swap so the copy in
/// memory is always the one last written to the repository.
pub struct LibraryCache {
    repository: AnyRepository,
    current: RwLock<LibraryMap>,
    persist: Mutex<()>,
}

impl LibraryCache {
    /// Start from the last persisted map, an unreadable record counts as empty
    pub async fn open(repository: AnyRepository) -> Self {
        let current = match repository.load().await {
            Ok(Some(map)) => {
                info!(libraries = map.len(), "loaded library map");
                map
            }
            Ok(None) => LibraryMap::default(),
            Err(err) => {
                warn!(%err, "ignore unreadable library map");
                LibraryMap::default()
            }
        };
        Self {
            repository,
            current: RwLock::new(current),
            persist: Mutex::new(()),
        }
    }

    /// Rebuild the map from the upstream views, persist it, then swap it in
    pub async fn refresh(
        &self,
        client: &MediaClient,
        session: &Session,
    ) -> Result<LibraryMap, LibraryError> {
        let views = client.list_views(session).await?;
        let map = LibraryMap::from_views(&views.items, Utc::now());
        let persisting = self.persist.lock().await;
        self.repository
            .save(&map)
            .await
            .map_err(LibraryError::Storage)?;
        *self.current.write() = map.clone();
        drop(persisting);
        info!(
            views = views.items.len(),
            libraries = map.len(),
            "refreshed library map"
        );
        Ok(map)
    }

    pub fn get(&self, collection_type: &str) -> Option<String> {
        self.current
            .read()
            .get(collection_type)
            .map(str::to_string)
    }

    pub fn snapshot(&self) -> LibraryMap {
        self.current.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::library::{FileRepository, MOVIES, MemoryRepository, TV_SHOWS};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session() -> Session {
        Session::new("tok1".to_string(), "u1".to_string())
    }

    async fn mock_views(server: &MockServer, status: u16) {
        Mock::given(method("GET"))
            .and(path("/Users/u1/Views"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "Items": [
                    {"Id": "lib-movies", "Name": "Movies", "CollectionType": "movies"},
                    {"Id": "lib-shows", "Name": "Shows", "CollectionType": "tvshows"},
                    {"Id": "lib-folder", "Name": "Folder"}
                ]
            })))
            .mount(server)
            .await;
    }

    fn client(server: &MockServer) -> MediaClient {
        MediaClient::new(&server.uri(), "test-device", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn nothing_before_refresh() {
        let cache = LibraryCache::open(AnyRepository::Memory(MemoryRepository::default())).await;
        assert_eq!(None, cache.get(MOVIES));
        assert_eq!(None, cache.get(TV_SHOWS));
        assert!(cache.snapshot().refreshed_at.is_none());
    }

    #[tokio::test]
    async fn refresh_resolves_collection_types() {
        let server = MockServer::start().await;
        mock_views(&server, 200).await;

        let cache = LibraryCache::open(AnyRepository::Memory(MemoryRepository::default())).await;
        let map = cache.refresh(&client(&server), &session()).await.unwrap();
        assert_eq!(2, map.len());
        assert_eq!(Some("lib-movies".to_string()), cache.get(MOVIES));
        assert_eq!(Some("lib-shows".to_string()), cache.get(TV_SHOWS));
        assert_eq!(None, cache.get("folders"));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_map() {
        let server = MockServer::start().await;
        mock_views(&server, 500).await;

        let cache = LibraryCache::open(AnyRepository::Memory(MemoryRepository::default())).await;
        let err = cache.refresh(&client(&server), &session()).await.unwrap_err();
        assert!(matches!(err, LibraryError::Media(MediaError::Upstream { .. })));
        assert_eq!(None, cache.get(MOVIES));
    }

    #[tokio::test]
    async fn refreshed_map_survives_restart() {
        let server = MockServer::start().await;
        mock_views(&server, 200).await;
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("libraries.json");

        let cache =
            LibraryCache::open(AnyRepository::File(FileRepository::new(file.clone()))).await;
        cache.refresh(&client(&server), &session()).await.unwrap();

        let reopened = LibraryCache::open(AnyRepository::File(FileRepository::new(file))).await;
        assert_eq!(Some("lib-movies".to_string()), reopened.get(MOVIES));
        assert_eq!(cache.snapshot(), reopened.snapshot());
    }

    #[tokio::test]
    async fn overlapping_refreshes_keep_memory_and_file_in_step() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Users/u1/Views"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(100))
                    .set_body_json(json!({
                        "Items": [{"Id": "slow-movies", "CollectionType": "movies"}]
                    })),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/Users/u1/Views"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Items": [{"Id": "fast-movies", "CollectionType": "movies"}]
            })))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("libraries.json");
        let client = client(&server);
        let session = session();

        let cache =
            LibraryCache::open(AnyRepository::File(FileRepository::new(file.clone()))).await;
        let (first, second) = tokio::join!(
            cache.refresh(&client, &session),
            cache.refresh(&client, &session),
        );
        first.unwrap();
        second.unwrap();

        let reopened = LibraryCache::open(AnyRepository::File(FileRepository::new(file))).await;
        assert_eq!(reopened.snapshot(), cache.snapshot());
        assert!(cache.get(MOVIES).is_some());
    }

    #[tokio::test]
    async fn unreadable_map_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("libraries.json");
        std::fs::write(&file, "{").unwrap();

        let cache = LibraryCache::open(AnyRepository::File(FileRepository::new(file))).await;
        assert!(cache.snapshot().is_empty());
    }
}
