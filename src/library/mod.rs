//! Library-ID cache.
//!
//! Resolves a collection type ("movies", "tvshows") to the upstream library
//! identifier. The map is rebuilt from the upstream views on login or an
//! explicit refresh, never on a miss.

mod cache;
mod file;
mod map;
mod memory;
mod repository;

pub use cache::{LibraryCache, LibraryError};
pub use file::FileRepository;
pub use map::{LibraryMap, MOVIES, TV_SHOWS};
pub use memory::MemoryRepository;
pub use repository::AnyRepository;
