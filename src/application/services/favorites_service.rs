use crate::application::ports::cache::FavoritesCache;
use crate::application::ports::local_store::LocalStore;
use crate::application::ports::remote_api::{FavoriteDto, FavoritesApi};
use crate::application::services::in_flight::InFlightSet;
use crate::domain::entities::{
    FavoriteDraft, FavoriteItem, SyncSession, cleanup_invalid_favorites,
    is_suspicious_favorite_id,
};
use crate::domain::value_objects::{AuthContext, ResourceType, ToggleKey};
use crate::shared::json::parse_or_default;
use crate::shared::{AppConfig, AppError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

const UNTITLED: &str = "Untitled";

/// お気に入りのミューテーションコーディネーター兼サーバーリコンサイラー。
///
/// All favorites mutation goes through this service: it applies the
/// optimistic cache write, issues the remote call for server-tracked
/// resources, reconciles against the authoritative list on success and
/// restores the pre-mutation snapshot on failure. Resources without a
/// backend mirror are persisted to the local store instead.
pub struct FavoritesService {
    store: Arc<dyn LocalStore>,
    api: Arc<dyn FavoritesApi>,
    cache: Arc<dyn FavoritesCache>,
    in_flight: InFlightSet,
    session: RwLock<SyncSession>,
    key_prefix: String,
    keep_cache_on_empty: bool,
    refresh_once_per_session: bool,
}

impl FavoritesService {
    pub fn new(
        store: Arc<dyn LocalStore>,
        api: Arc<dyn FavoritesApi>,
        cache: Arc<dyn FavoritesCache>,
        config: &AppConfig,
    ) -> Self {
        Self {
            store,
            api,
            cache,
            in_flight: InFlightSet::new(),
            session: RwLock::new(SyncSession::default()),
            key_prefix: config.storage.key_prefix.clone(),
            keep_cache_on_empty: config.sync.keep_cache_on_empty_response,
            refresh_once_per_session: config.sync.refresh_once_per_session,
        }
    }

    fn local_key(&self, user_id: Option<&str>) -> String {
        match user_id {
            Some(user_id) => format!("{}_favorites_{}", self.key_prefix, user_id),
            None => format!("{}_favorites", self.key_prefix),
        }
    }

    fn server_cache_key(&self, user_id: &str) -> String {
        format!("{}_favorites_server_{}", self.key_prefix, user_id)
    }

    /// セッション開始時の初期化。保存済みスナップショットでキャッシュを温める。
    ///
    /// Server-cached data wins for a known user so a cold start renders
    /// something useful before the first network round-trip.
    pub async fn init(&self, user_id: Option<&str>) {
        self.reset_fetch_state(user_id.map(|value| value.to_string()))
            .await;
        match user_id {
            Some(user_id) => self.load_server_cached(user_id).await,
            None => self.load_local(None).await,
        }
    }

    /// ログアウト時のリセット。キャッシュとフェッチ状態を破棄する。
    pub async fn reset(&self) {
        self.cache.clear().await;
        self.reset_fetch_state(None).await;
    }

    // ==== selectors ====

    pub async fn favorites(&self) -> Vec<FavoriteItem> {
        self.cache.all().await
    }

    pub async fn is_favorite(&self, id: &str, resource_type: ResourceType) -> bool {
        self.cache.contains(id, resource_type).await
    }

    /// UIがトグルを無効化するための実行中チェック
    pub fn is_in_flight(&self, key: &ToggleKey) -> bool {
        self.in_flight.contains(key)
    }

    // ==== mutations ====

    pub async fn add_favorite(
        &self,
        draft: FavoriteDraft,
        auth: &AuthContext,
    ) -> Result<(), AppError> {
        if !auth.is_authenticated {
            return Err(AppError::AuthRequired);
        }

        let key = draft.key();
        // 実行中なら黙って無視（二重タップ対策）
        if !self.in_flight.try_begin(&key) {
            return Ok(());
        }

        let result = match (auth.user_id.as_deref(), draft.resource_type.is_server_tracked()) {
            (Some(user_id), true) => self.add_favorite_remote(draft, user_id, &key).await,
            (user_id, _) => self.add_favorite_local(draft, user_id).await,
        };

        self.in_flight.finish(&key);
        result
    }

    async fn add_favorite_remote(
        &self,
        draft: FavoriteDraft,
        user_id: &str,
        key: &ToggleKey,
    ) -> Result<(), AppError> {
        if self.cache.get(key).await.is_some() {
            return Ok(());
        }

        let item = draft.into_item();
        let id = item.id.clone();
        self.cache.insert(item).await;

        match self.api.mark_favorite(&id).await {
            Ok(()) => {
                // 成功時はサーバーの authoritative view で上書き。
                // The mutation itself committed; a failed refresh only
                // delays reconciliation, so it is not rolled back.
                if let Err(err) = self.refresh_from_server(user_id).await {
                    warn!("Favorites refresh after mark failed: {}", err);
                }
                info!("Marked favorite {} for user {}", id, user_id);
                Ok(())
            }
            Err(err) => {
                self.cache.remove(key).await;
                Err(err)
            }
        }
    }

    async fn add_favorite_local(
        &self,
        draft: FavoriteDraft,
        user_id: Option<&str>,
    ) -> Result<(), AppError> {
        if is_suspicious_favorite_id(&draft.id) {
            warn!(
                "Suspicious favorite id {} (looks like an HTTP error code), saving anyway",
                draft.id
            );
        }

        if self.cache.get(&draft.key()).await.is_some() {
            return Ok(());
        }

        let item = draft.into_item();
        let mut items = self.cache.all().await;
        items.push(item);

        let payload = serde_json::to_string(&items)?;
        match self.store.set(&self.local_key(user_id), &payload).await {
            Ok(()) => {
                self.cache.replace_all(items).await;
                Ok(())
            }
            Err(err) => {
                error!("Failed to persist local favorite: {}", err);
                Err(err)
            }
        }
    }

    pub async fn remove_favorite(
        &self,
        id: &str,
        resource_type: ResourceType,
        auth: &AuthContext,
    ) -> Result<(), AppError> {
        if !auth.is_authenticated {
            return Err(AppError::AuthRequired);
        }

        let key = ToggleKey::new(resource_type, id);
        if !self.in_flight.try_begin(&key) {
            return Ok(());
        }

        let result = match (auth.user_id.as_deref(), resource_type.is_server_tracked()) {
            (Some(user_id), true) => {
                self.remove_favorite_remote(id, user_id, &key).await
            }
            (user_id, _) => self.remove_favorite_local(id, resource_type, user_id).await,
        };

        self.in_flight.finish(&key);
        result
    }

    async fn remove_favorite_remote(
        &self,
        id: &str,
        user_id: &str,
        key: &ToggleKey,
    ) -> Result<(), AppError> {
        // ロールバックは再計算ではなく、変更前のスナップショットの復元
        let before = self.cache.all().await;
        self.cache.remove(key).await;

        match self.api.unmark_favorite(id).await {
            Ok(()) => {
                if let Err(err) = self.refresh_from_server(user_id).await {
                    warn!("Favorites refresh after unmark failed: {}", err);
                }
                info!("Unmarked favorite {} for user {}", id, user_id);
                Ok(())
            }
            Err(err) => {
                self.cache.replace_all(before).await;
                Err(err)
            }
        }
    }

    async fn remove_favorite_local(
        &self,
        id: &str,
        resource_type: ResourceType,
        user_id: Option<&str>,
    ) -> Result<(), AppError> {
        if is_suspicious_favorite_id(id) {
            warn!(
                "Suspicious favorite id {} on remove (looks like an HTTP error code), removing anyway",
                id
            );
        }

        let items: Vec<FavoriteItem> = self
            .cache
            .all()
            .await
            .into_iter()
            .filter(|item| !item.matches(id, resource_type))
            .collect();

        let payload = serde_json::to_string(&items)?;
        match self.store.set(&self.local_key(user_id), &payload).await {
            Ok(()) => {
                self.cache.replace_all(items).await;
                Ok(())
            }
            Err(err) => {
                error!("Failed to persist local favorite removal: {}", err);
                Err(err)
            }
        }
    }

    /// 全件削除。認証済みならサーバー側も消し、スナップショットを空に戻す。
    pub async fn clear_favorites(&self, auth: &AuthContext) -> Result<(), AppError> {
        if auth.is_authenticated {
            if let Some(user_id) = auth.user_id.as_deref() {
                self.api.clear_user_favorites(user_id).await?;
                self.cache.clear().await;
                self.store
                    .set(&self.server_cache_key(user_id), "[]")
                    .await?;
                return Ok(());
            }
        }

        self.store
            .set(&self.local_key(auth.user_id.as_deref()), "[]")
            .await?;
        self.cache.clear().await;
        Ok(())
    }

    // ==== loading & reconciliation ====

    /// ローカル保存分を読み込む。読み取り専用パスなので失敗はログのみ。
    pub async fn load_local(&self, user_id: Option<&str>) {
        match self.store.get(&self.local_key(user_id)).await {
            Ok(Some(raw)) => {
                let parsed: Vec<FavoriteItem> = parse_or_default(Some(&raw), Vec::new());
                self.cache
                    .replace_all(cleanup_invalid_favorites(parsed))
                    .await;
            }
            Ok(None) => {}
            Err(err) => warn!("Failed to load local favorites: {}", err),
        }
    }

    /// 前回のサーバースナップショットでキャッシュを温める（read-through）。
    pub async fn load_server_cached(&self, user_id: &str) {
        match self.store.get(&self.server_cache_key(user_id)).await {
            Ok(Some(raw)) => {
                let parsed: Vec<FavoriteItem> = parse_or_default(Some(&raw), Vec::new());
                self.cache.replace_all(parsed).await;
            }
            Ok(None) => {}
            Err(err) => warn!("Failed to load server favorites snapshot: {}", err),
        }
    }

    /// サーバーの authoritative view を取得してキャッシュを差し替える。
    ///
    /// Empty-server guard: an empty response while the cache holds items
    /// is treated as a transient/partial answer and the cache is kept.
    /// This is an explicit, tested policy.
    pub async fn refresh_from_server(&self, user_id: &str) -> Result<(), AppError> {
        let dtos = self.api.fetch_user_favorites(user_id).await?;
        let items: Vec<FavoriteItem> = dtos.into_iter().map(favorite_from_dto).collect();

        let current_len = self.cache.all().await.len();
        if items.is_empty() && current_len > 0 && self.keep_cache_on_empty {
            warn!(
                "Server returned empty favorites while {} items cached; keeping cache",
                current_len
            );
        } else {
            self.cache.replace_all(items.clone()).await;
            info!("Refreshed {} favorites for user {}", items.len(), user_id);
        }

        // スナップショットは取得結果をそのまま反映する
        let payload = serde_json::to_string(&items)?;
        self.store
            .set(&self.server_cache_key(user_id), &payload)
            .await?;

        Ok(())
    }

    /// セッション中1回だけの authoritative fetch。強制更新は
    /// `refresh_from_server` を直接呼ぶ。
    pub async fn ensure_server_data(&self, user_id: &str) -> Result<(), AppError> {
        if self.refresh_once_per_session {
            let mut session = self.session.write().await;
            if session.is_fetched_for(user_id) {
                return Ok(());
            }
            // 取得前にマークして並行呼び出しの二重フェッチを防ぐ
            session.mark_fetched(user_id);
        }

        self.refresh_from_server(user_id).await
    }

    pub async fn reset_fetch_state(&self, user_id: Option<String>) {
        let mut session = self.session.write().await;
        session.reset(user_id);
    }
}

fn favorite_from_dto(dto: FavoriteDto) -> FavoriteItem {
    let id = dto.id.to_string();
    let url = dto.url.filter(|value| !value.is_empty()).unwrap_or_else(|| {
        let slug_or_id = dto.slug.clone().filter(|value| !value.is_empty());
        format!("/travels/{}", slug_or_id.unwrap_or_else(|| id.clone()))
    });
    let added_at = dto
        .updated_at
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|parsed| parsed.timestamp_millis())
        .unwrap_or_else(|| Utc::now().timestamp_millis());

    FavoriteItem {
        id,
        resource_type: ResourceType::Travel,
        title: dto
            .name
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string()),
        image_url: dto.travel_image_thumb_url,
        url,
        added_at,
        country: dto.country_name,
        city: dto.city_name,
    }
}
