pub mod entities;
pub mod value_objects;

pub use entities::{CommentDto, FavoriteDraft, FavoriteItem, ReactionState, SyncSession};
pub use value_objects::{AuthContext, ResourceType, ToggleKey};
