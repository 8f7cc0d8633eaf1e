use std::path::PathBuf;

use crate::auth::AuthCheck;
use crate::library::LibraryCache;
use crate::media::MediaClient;

/// Application state shared across all handlers
pub struct AppState {
    pub auth_check: AuthCheck,
    pub client: MediaClient,
    pub data_dir: PathBuf,
    pub libraries: LibraryCache,
    pub secure_cookies: bool,
}
