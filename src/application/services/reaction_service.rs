use crate::application::ports::cache::ReactionCache;
use crate::application::ports::remote_api::CommentReactionsApi;
use crate::application::services::in_flight::InFlightSet;
use crate::domain::entities::ReactionState;
use crate::domain::value_objects::{AuthContext, ToggleKey};
use crate::shared::AppError;
use std::sync::Arc;
use tracing::info;

/// コメントlikeトグルのミューテーションコーディネーター。
///
/// Two states per comment, `Unliked` and `Liked`, both transitions
/// optimistic-first. Pending-ness is not a third state; it is membership
/// in the in-flight set, which the UI uses to disable the control.
pub struct ReactionService {
    api: Arc<dyn CommentReactionsApi>,
    cache: Arc<dyn ReactionCache>,
    in_flight: InFlightSet,
}

impl ReactionService {
    pub fn new(api: Arc<dyn CommentReactionsApi>, cache: Arc<dyn ReactionCache>) -> Self {
        Self {
            api,
            cache,
            in_flight: InFlightSet::new(),
        }
    }

    /// 取得済みコメント一覧からリアクション状態を初期投入する
    pub async fn prime(&self, states: Vec<ReactionState>) {
        for state in states {
            self.cache.set(state).await;
        }
    }

    pub async fn reaction(&self, comment_id: i64) -> Option<ReactionState> {
        self.cache.get(comment_id).await
    }

    pub fn is_in_flight(&self, comment_id: i64) -> bool {
        self.in_flight.contains(&ToggleKey::comment_like(comment_id))
    }

    pub async fn like(&self, comment_id: i64, auth: &AuthContext) -> Result<(), AppError> {
        self.toggle(comment_id, auth, true).await
    }

    pub async fn unlike(&self, comment_id: i64, auth: &AuthContext) -> Result<(), AppError> {
        self.toggle(comment_id, auth, false).await
    }

    async fn toggle(
        &self,
        comment_id: i64,
        auth: &AuthContext,
        desired_liked: bool,
    ) -> Result<(), AppError> {
        if !auth.is_authenticated {
            return Err(AppError::AuthRequired);
        }

        let key = ToggleKey::comment_like(comment_id);
        // 同じコメントへの実行中呼び出しは重複した意図として黙殺する。
        // A double tap must not invert the toggle or issue a second call.
        if !self.in_flight.try_begin(&key) {
            return Ok(());
        }

        let before = self.cache.get(comment_id).await;
        let prior = before
            .clone()
            .unwrap_or_else(|| ReactionState::new(comment_id, false, 0));
        let optimistic = if desired_liked {
            prior.liked()
        } else {
            prior.unliked()
        };
        self.cache.set(optimistic.clone()).await;

        let result = if desired_liked {
            self.api.like_comment(comment_id).await
        } else {
            self.api.unlike_comment(comment_id).await
        };

        match result {
            Ok(response) => {
                // 204などボディ無し応答では楽観的状態をそのまま確定する
                if let Some(dto) = response {
                    self.cache.set(optimistic.merge_server(&dto)).await;
                }
                info!(
                    "Comment {} {}",
                    comment_id,
                    if desired_liked { "liked" } else { "unliked" }
                );
                self.in_flight.finish(&key);
                Ok(())
            }
            Err(err) => {
                // 変更前スナップショットの文字通りの復元
                match before {
                    Some(previous) => self.cache.set(previous).await,
                    None => {
                        self.cache.remove(comment_id).await;
                    }
                }
                self.in_flight.finish(&key);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CommentDto;
    use crate::infrastructure::cache::ReactionCacheService;
    use tokio::sync::{Mutex, Notify};

    struct TestReactionsApi {
        like_calls: Mutex<Vec<i64>>,
        unlike_calls: Mutex<Vec<i64>>,
        like_result: Mutex<Option<Result<Option<CommentDto>, AppError>>>,
        unlike_result: Mutex<Option<Result<Option<CommentDto>, AppError>>>,
        like_gate: Option<Arc<Notify>>,
    }

    impl TestReactionsApi {
        fn new() -> Self {
            Self {
                like_calls: Mutex::new(Vec::new()),
                unlike_calls: Mutex::new(Vec::new()),
                like_result: Mutex::new(None),
                unlike_result: Mutex::new(None),
                like_gate: None,
            }
        }

        fn with_like_gate(gate: Arc<Notify>) -> Self {
            let mut api = Self::new();
            api.like_gate = Some(gate);
            api
        }

        async fn set_like_result(&self, result: Result<Option<CommentDto>, AppError>) {
            *self.like_result.lock().await = Some(result);
        }

        async fn set_unlike_result(&self, result: Result<Option<CommentDto>, AppError>) {
            *self.unlike_result.lock().await = Some(result);
        }

        async fn like_call_count(&self) -> usize {
            self.like_calls.lock().await.len()
        }
    }

    #[async_trait::async_trait]
    impl CommentReactionsApi for TestReactionsApi {
        async fn like_comment(&self, comment_id: i64) -> Result<Option<CommentDto>, AppError> {
            self.like_calls.lock().await.push(comment_id);
            if let Some(gate) = &self.like_gate {
                gate.notified().await;
            }
            self.like_result.lock().await.take().unwrap_or(Ok(None))
        }

        async fn unlike_comment(&self, comment_id: i64) -> Result<Option<CommentDto>, AppError> {
            self.unlike_calls.lock().await.push(comment_id);
            self.unlike_result.lock().await.take().unwrap_or(Ok(None))
        }
    }

    fn setup_with_api(api: TestReactionsApi) -> (Arc<ReactionService>, Arc<TestReactionsApi>) {
        crate::shared::test_support::init_tracing();
        let api = Arc::new(api);
        let cache = Arc::new(ReactionCacheService::new());
        let service = Arc::new(ReactionService::new(api.clone(), cache));
        (service, api)
    }

    fn setup() -> (Arc<ReactionService>, Arc<TestReactionsApi>) {
        setup_with_api(TestReactionsApi::new())
    }

    fn auth() -> AuthContext {
        AuthContext::authenticated("7")
    }

    #[tokio::test]
    async fn like_rejects_unauthenticated_callers() {
        let (service, api) = setup();
        service.prime(vec![ReactionState::new(1, false, 5)]).await;

        let err = service
            .like(1, &AuthContext::anonymous())
            .await
            .expect_err("must reject");
        assert!(matches!(err, AppError::AuthRequired));

        assert_eq!(
            service.reaction(1).await,
            Some(ReactionState::new(1, false, 5)),
            "cache unchanged"
        );
        assert_eq!(api.like_call_count().await, 0);
    }

    #[tokio::test]
    async fn double_tap_issues_exactly_one_like_call() {
        let gate = Arc::new(Notify::new());
        let (service, api) = setup_with_api(TestReactionsApi::with_like_gate(gate.clone()));
        service.prime(vec![ReactionState::new(1, false, 5)]).await;

        let spawned = service.clone();
        let first = tokio::spawn(async move { spawned.like(1, &auth()).await });

        while api.like_call_count().await == 0 {
            tokio::task::yield_now().await;
        }
        assert!(service.is_in_flight(1));

        // 実行中の2回目はUnlikedへのトグルではなくno-op
        service
            .like(1, &auth())
            .await
            .expect("duplicate intent is a silent no-op");
        assert_eq!(api.like_call_count().await, 1);
        assert_eq!(
            service.reaction(1).await,
            Some(ReactionState::new(1, true, 6)),
            "optimistic state stays Liked"
        );

        gate.notify_one();
        first.await.expect("join").expect("first like succeeds");
        assert_eq!(api.like_call_count().await, 1);
        assert!(!service.is_in_flight(1));
    }

    #[tokio::test]
    async fn failed_like_restores_exact_prior_state() {
        let (service, api) = setup();
        service.prime(vec![ReactionState::new(1, false, 5)]).await;
        api.set_like_result(Err(AppError::Network("503".to_string())))
            .await;

        let err = service.like(1, &auth()).await.expect_err("propagates");
        assert!(matches!(err, AppError::Network(_)));

        assert_eq!(
            service.reaction(1).await,
            Some(ReactionState::new(1, false, 5)),
            "rollback must be the literal pre-mutation snapshot"
        );
        assert!(!service.is_in_flight(1));
    }

    #[tokio::test]
    async fn like_preserves_intent_when_response_omits_is_liked() {
        let (service, api) = setup();
        service.prime(vec![ReactionState::new(1, false, 5)]).await;
        api.set_like_result(Ok(Some(CommentDto {
            id: 1,
            likes_count: Some(6),
            is_liked: None,
        })))
        .await;

        service.like(1, &auth()).await.expect("like succeeds");

        assert_eq!(
            service.reaction(1).await,
            Some(ReactionState::new(1, true, 6)),
            "missing is_liked must not reset the toggle"
        );
    }

    #[tokio::test]
    async fn sequential_toggles_never_compound_deltas() {
        let (service, api) = setup();
        service.prime(vec![ReactionState::new(1, false, 5)]).await;

        api.set_like_result(Ok(Some(CommentDto {
            id: 1,
            likes_count: Some(6),
            is_liked: None,
        })))
        .await;
        service.like(1, &auth()).await.expect("like");
        assert_eq!(service.reaction(1).await, Some(ReactionState::new(1, true, 6)));

        // 204 No Content: 楽観的デルタだけが残る
        service.unlike(1, &auth()).await.expect("unlike");
        assert_eq!(service.reaction(1).await, Some(ReactionState::new(1, false, 5)));

        api.set_like_result(Ok(Some(CommentDto {
            id: 1,
            likes_count: Some(6),
            is_liked: None,
        })))
        .await;
        service.like(1, &auth()).await.expect("like again");
        assert_eq!(service.reaction(1).await, Some(ReactionState::new(1, true, 6)));
    }

    #[tokio::test]
    async fn unlike_count_never_goes_negative() {
        let (service, _api) = setup();
        service.prime(vec![ReactionState::new(1, true, 0)]).await;

        service.unlike(1, &auth()).await.expect("unlike succeeds");
        assert_eq!(service.reaction(1).await, Some(ReactionState::new(1, false, 0)));
    }

    #[tokio::test]
    async fn failed_like_on_unknown_comment_clears_the_slot() {
        let (service, api) = setup();
        api.set_like_result(Err(AppError::Network("down".to_string())))
            .await;

        service
            .like(99, &auth())
            .await
            .expect_err("failure propagates");

        assert_eq!(
            service.reaction(99).await,
            None,
            "a slot that did not exist before the mutation must not survive rollback"
        );
    }

    #[tokio::test]
    async fn unlike_rollback_uses_snapshot_not_recomputation() {
        let (service, api) = setup();
        service.prime(vec![ReactionState::new(1, true, 6)]).await;
        api.set_unlike_result(Err(AppError::Network("reset".to_string())))
            .await;

        service
            .unlike(1, &auth())
            .await
            .expect_err("failure propagates");

        assert_eq!(
            service.reaction(1).await,
            Some(ReactionState::new(1, true, 6))
        );
    }
}
