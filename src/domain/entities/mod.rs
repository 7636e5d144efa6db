pub mod favorite;
pub mod reaction;
pub mod session;

pub use favorite::{
    FavoriteDraft, FavoriteItem, cleanup_invalid_favorites, is_suspicious_favorite_id,
};
pub use reaction::{CommentDto, ReactionState};
pub use session::SyncSession;
