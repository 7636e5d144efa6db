pub mod auth;
pub mod toggle_key;

pub use auth::AuthContext;
pub use toggle_key::{ResourceType, ToggleKey};
