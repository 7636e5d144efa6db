use crate::application::ports::cache::FavoritesCache;
use crate::domain::entities::FavoriteItem;
use crate::domain::value_objects::{ResourceType, ToggleKey};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// お気に入りのインメモリキャッシュサービス
///
/// Keeps insertion order, which is the order the UI renders.
#[derive(Default)]
pub struct FavoritesCacheService {
    items: Arc<RwLock<Vec<FavoriteItem>>>,
}

impl FavoritesCacheService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoritesCache for FavoritesCacheService {
    async fn all(&self) -> Vec<FavoriteItem> {
        self.items.read().await.clone()
    }

    async fn get(&self, key: &ToggleKey) -> Option<FavoriteItem> {
        let items = self.items.read().await;
        items.iter().find(|item| item.key() == *key).cloned()
    }

    async fn contains(&self, id: &str, resource_type: ResourceType) -> bool {
        let items = self.items.read().await;
        items.iter().any(|item| item.matches(id, resource_type))
    }

    async fn insert(&self, item: FavoriteItem) {
        let mut items = self.items.write().await;
        let key = item.key();
        items.retain(|existing| existing.key() != key);
        items.push(item);
    }

    async fn remove(&self, key: &ToggleKey) -> Option<FavoriteItem> {
        let mut items = self.items.write().await;
        let position = items.iter().position(|item| item.key() == *key)?;
        Some(items.remove(position))
    }

    async fn replace_all(&self, new_items: Vec<FavoriteItem>) {
        let mut items = self.items.write().await;
        *items = new_items;
    }

    async fn clear(&self) {
        let mut items = self.items.write().await;
        items.clear();
    }
}
