use std::future::Future;
use std::path::PathBuf;

use super::file::FileRepository;
use super::map::LibraryMap;
use super::memory::MemoryRepository;

/// Storage for the last refreshed [`LibraryMap`]
pub trait LibraryRepository: Send + Sync {
    /// `None` when nothing has been saved yet
    fn load(&self) -> impl Future<Output = anyhow::Result<Option<LibraryMap>>> + Send;

    /// Replace the stored map as a whole
    fn save(&self, map: &LibraryMap) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// `LibraryRepository` uses RPITIT and is not object-safe, so dispatch by hand
pub enum AnyRepository {
    File(FileRepository),
    Memory(MemoryRepository),
}

impl AnyRepository {
    /// A file repository when a path is configured, memory otherwise
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => AnyRepository::File(FileRepository::new(path)),
            None => AnyRepository::Memory(MemoryRepository::default()),
        }
    }
}

impl LibraryRepository for AnyRepository {
    async fn load(&self) -> anyhow::Result<Option<LibraryMap>> {
        match self {
            AnyRepository::File(r) => r.load().await,
            AnyRepository::Memory(r) => r.load().await,
        }
    }

    async fn save(&self, map: &LibraryMap) -> anyhow::Result<()> {
        match self {
            AnyRepository::File(r) => r.save(map).await,
            AnyRepository::Memory(r) => r.save(map).await,
        }
    }
}
