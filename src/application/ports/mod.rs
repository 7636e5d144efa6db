pub mod cache;
pub mod local_store;
pub mod remote_api;

pub use cache::{FavoritesCache, ReactionCache};
pub use local_store::LocalStore;
pub use remote_api::{CommentReactionsApi, FavoriteDto, FavoritesApi};
