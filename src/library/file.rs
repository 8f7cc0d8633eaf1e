use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use tempfile::NamedTempFile;

use super::map::LibraryMap;
use super::repository::LibraryRepository;

/// JSON file replaced atomically on every save
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

fn read_map(path: &Path) -> anyhow::Result<Option<LibraryMap>> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", path.display()));
        }
    };
    let map = serde_json::from_slice(&content)
        .with_context(|| format!("Invalid library map: {}", path.display()))?;
    Ok(Some(map))
}

// write to a sibling temp file and rename over the target, readers never see a partial map
fn write_map(path: &Path, map: &LibraryMap) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let mut file = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut file, map)?;
    file.as_file().sync_all()?;
    file.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

impl LibraryRepository for FileRepository {
    async fn load(&self) -> anyhow::Result<Option<LibraryMap>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_map(&path)).await?
    }

    async fn save(&self, map: &LibraryMap) -> anyhow::Result<()> {
        let path = self.path.clone();
        let map = map.clone();
        tokio::task::spawn_blocking(move || write_map(&path, &map)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{MOVIES, TV_SHOWS};
    use chrono::Utc;

    fn sample() -> LibraryMap {
        let mut map = LibraryMap {
            refreshed_at: Some(Utc::now()),
            ..LibraryMap::default()
        };
        map.libraries.insert(MOVIES.to_string(), "lib-movies".to_string());
        map.libraries.insert(TV_SHOWS.to_string(), "lib-shows".to_string());
        map
    }

    #[tokio::test]
    async fn missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let repository = FileRepository::new(dir.path().join("libraries.json"));
        assert!(repository.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn saved_map_is_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let repository = FileRepository::new(dir.path().join("nested/libraries.json"));
        let map = sample();
        repository.save(&map).await.unwrap();
        assert_eq!(Some(map), repository.load().await.unwrap());
    }

    #[tokio::test]
    async fn save_replaces_whole_record() {
        let dir = tempfile::tempdir().unwrap();
        let repository = FileRepository::new(dir.path().join("libraries.json"));
        repository.save(&sample()).await.unwrap();

        let mut smaller = LibraryMap::default();
        smaller.libraries.insert(MOVIES.to_string(), "lib-new".to_string());
        repository.save(&smaller).await.unwrap();

        let loaded = repository.load().await.unwrap().unwrap();
        assert_eq!(1, loaded.len());
        assert_eq!(Some("lib-new"), loaded.get(MOVIES));
        assert_eq!(None, loaded.get(TV_SHOWS));

        // only the target file is left behind
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(1, entries);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("libraries.json");
        fs::write(&path, "not json").unwrap();
        let repository = FileRepository::new(path);
        let err = repository.load().await.unwrap_err();
        assert!(err.to_string().contains("Invalid library map"));
    }
}
