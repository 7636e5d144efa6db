use crate::domain::entities::CommentDto;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// サーバーが返すお気に入り旅行記のDTO。idを除く全フィールドが省略されうる。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteDto {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub travel_image_thumb_url: Option<String>,
    /// RFC 3339 文字列
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, rename = "countryName")]
    pub country_name: Option<String>,
    #[serde(default, rename = "cityName")]
    pub city_name: Option<String>,
}

/// お気に入りのリソース別ミューテーションAPIポート
#[async_trait]
pub trait FavoritesApi: Send + Sync {
    async fn mark_favorite(&self, id: &str) -> Result<(), AppError>;

    async fn unmark_favorite(&self, id: &str) -> Result<(), AppError>;

    /// サーバー側のお気に入り全件（authoritative view）を取得
    async fn fetch_user_favorites(&self, user_id: &str) -> Result<Vec<FavoriteDto>, AppError>;

    async fn clear_user_favorites(&self, user_id: &str) -> Result<(), AppError>;
}

/// コメントリアクションAPIポート
///
/// Either call may answer `204 No Content`; adapters map that to `None`.
#[async_trait]
pub trait CommentReactionsApi: Send + Sync {
    async fn like_comment(&self, comment_id: i64) -> Result<Option<CommentDto>, AppError>;

    async fn unlike_comment(&self, comment_id: i64) -> Result<Option<CommentDto>, AppError>;
}
