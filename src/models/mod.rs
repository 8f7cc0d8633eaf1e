mod link;
mod view;

pub use link::{LINKS_FILE, Link, SERIAL_COMMANDS_FILE, SerialCommand, load_entries};
pub use view::{EpisodeRow, ItemCard, LibraryEntry, UserProfile};
