mod client;
mod error;
mod types;

pub use client::{MediaClient, TOKEN_HEADER, is_item_id};
pub use error::MediaError;
pub use types::{MediaItem, User};
