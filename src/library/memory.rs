use parking_lot::Mutex;

use super::map::LibraryMap;
use super::repository::LibraryRepository;

/// Keeps the map for the lifetime of the process only
#[derive(Default)]
pub struct MemoryRepository {
    record: Mutex<Option<LibraryMap>>,
}

impl LibraryRepository for MemoryRepository {
    async fn load(&self) -> anyhow::Result<Option<LibraryMap>> {
        Ok(self.record.lock().clone())
    }

    async fn save(&self, map: &LibraryMap) -> anyhow::Result<()> {
        *self.record.lock() = Some(map.clone());
        Ok(())
    }
}
