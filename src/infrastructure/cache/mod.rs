pub mod favorites_cache;
pub mod reaction_cache;

pub use favorites_cache::FavoritesCacheService;
pub use reaction_cache::ReactionCacheService;
