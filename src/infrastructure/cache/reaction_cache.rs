use crate::application::ports::cache::ReactionCache;
use crate::domain::entities::ReactionState;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// コメントリアクションのインメモリキャッシュサービス
#[derive(Default)]
pub struct ReactionCacheService {
    states: Arc<RwLock<HashMap<i64, ReactionState>>>,
}

impl ReactionCacheService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReactionCache for ReactionCacheService {
    async fn get(&self, entity_id: i64) -> Option<ReactionState> {
        let states = self.states.read().await;
        states.get(&entity_id).cloned()
    }

    async fn set(&self, state: ReactionState) {
        let mut states = self.states.write().await;
        states.insert(state.entity_id, state);
    }

    async fn remove(&self, entity_id: i64) -> Option<ReactionState> {
        let mut states = self.states.write().await;
        states.remove(&entity_id)
    }

    async fn clear(&self) {
        let mut states = self.states.write().await;
        states.clear();
    }
}
