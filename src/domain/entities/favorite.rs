use crate::domain::value_objects::{ResourceType, ToggleKey};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// お気に入り1件を表すドメインエンティティ。
///
/// The cache holds at most one item per `ToggleKey`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub url: String,
    /// 追加時刻（ミリ秒）
    pub added_at: i64,
    /// 旧スナップショットはワイヤ名 `countryName` のまま保存されていた
    #[serde(alias = "countryName", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl FavoriteItem {
    pub fn key(&self) -> ToggleKey {
        ToggleKey::new(self.resource_type, self.id.clone())
    }

    pub fn matches(&self, id: &str, resource_type: ResourceType) -> bool {
        self.id == id && self.resource_type == resource_type
    }

    /// ロード時の足切り条件。idかtitleが空のレコードは捨てる。
    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty() && !self.title.trim().is_empty()
    }
}

/// `added_at` 抜きのお気に入り入力。保存時に現在時刻が付与される。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteDraft {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl FavoriteDraft {
    pub fn key(&self) -> ToggleKey {
        ToggleKey::new(self.resource_type, self.id.clone())
    }

    pub fn into_item(self) -> FavoriteItem {
        FavoriteItem {
            id: self.id,
            resource_type: self.resource_type,
            title: self.title,
            image_url: self.image_url,
            url: self.url,
            added_at: Utc::now().timestamp_millis(),
            country: self.country,
            city: self.city,
        }
    }
}

/// HTTPエラーコードに見えるIDを検出する
///
/// A known upstream bug occasionally surfaced response codes as item ids;
/// callers log these but still proceed, matching the production behavior.
pub fn is_suspicious_favorite_id(id: &str) -> bool {
    matches!(id.parse::<u32>(), Ok(n) if (400..=599).contains(&n))
}

/// 保存データから不正なレコードを取り除く
pub fn cleanup_invalid_favorites(items: Vec<FavoriteItem>) -> Vec<FavoriteItem> {
    items.into_iter().filter(FavoriteItem::is_well_formed).collect()
}
