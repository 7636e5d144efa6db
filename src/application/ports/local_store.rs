use crate::shared::error::AppError;
use async_trait::async_trait;

/// 名前空間付きの非同期key/valueストアポート
///
/// Payloads are JSON strings. Implementations must tolerate unknown keys
/// (`get` returns `None`, `remove` is a no-op).
#[async_trait]
pub trait LocalStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    async fn remove(&self, key: &str) -> Result<(), AppError>;
}
