pub mod config;
pub mod error;
pub mod json;
#[cfg(test)]
pub mod test_support;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use json::parse_or_default;
