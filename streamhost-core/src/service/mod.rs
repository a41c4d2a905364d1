pub mod embeds;
pub mod player;
pub mod player_pages;

pub use embeds::{embed_bundle, EmbedBundle, EmbedSnippet, PlayerKind};
pub use player::{PlayerRequest, PlayerService, PlayerSource};
pub use player_pages::{PlayerPages, PLAYER_ERROR_PAGE};
