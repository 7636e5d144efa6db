pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::ports::{
    CommentReactionsApi, FavoriteDto, FavoritesApi, FavoritesCache, LocalStore, ReactionCache,
};
pub use application::services::{FavoritesService, ReactionService};
pub use domain::entities::{CommentDto, FavoriteDraft, FavoriteItem, ReactionState};
pub use domain::value_objects::{AuthContext, ResourceType, ToggleKey};
pub use infrastructure::cache::{FavoritesCacheService, ReactionCacheService};
pub use infrastructure::storage::{FileStore, MemoryStore};
pub use shared::{AppConfig, AppError, Result};
