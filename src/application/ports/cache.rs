use crate::domain::entities::{FavoriteItem, ReactionState};
use crate::domain::value_objects::{ResourceType, ToggleKey};
use async_trait::async_trait;

/// お気に入り用のキャッシュポート
///
/// The in-memory, UI-visible source of truth. Only the favorites service
/// writes through this port; UI layers read via its selectors.
#[async_trait]
pub trait FavoritesCache: Send + Sync {
    /// 全件をUI表示順（追加順）で取得
    async fn all(&self) -> Vec<FavoriteItem>;

    async fn get(&self, key: &ToggleKey) -> Option<FavoriteItem>;

    async fn contains(&self, id: &str, resource_type: ResourceType) -> bool;

    /// 追加。同じキーの既存エントリは置き換える。
    async fn insert(&self, item: FavoriteItem);

    /// 削除し、直前の値を返す
    async fn remove(&self, key: &ToggleKey) -> Option<FavoriteItem>;

    /// キャッシュを丸ごと差し替え
    async fn replace_all(&self, items: Vec<FavoriteItem>);

    async fn clear(&self);
}

/// コメントリアクション用のキャッシュポート
#[async_trait]
pub trait ReactionCache: Send + Sync {
    async fn get(&self, entity_id: i64) -> Option<ReactionState>;

    async fn set(&self, state: ReactionState);

    async fn remove(&self, entity_id: i64) -> Option<ReactionState>;

    async fn clear(&self);
}
