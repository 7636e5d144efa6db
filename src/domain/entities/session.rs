/// サーバーからの authoritative fetch をセッション中1回に抑えるためのガード状態。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSession {
    pub user_id: Option<String>,
    pub fetched: bool,
}

impl SyncSession {
    /// このユーザーについて既に取得済みか
    pub fn is_fetched_for(&self, user_id: &str) -> bool {
        self.fetched && self.user_id.as_deref() == Some(user_id)
    }

    /// 取得済みとして記録する
    pub fn mark_fetched(&mut self, user_id: &str) {
        self.user_id = Some(user_id.to_string());
        self.fetched = true;
    }

    /// ユーザー切り替え・ログアウト時のリセット。次回は必ず再取得になる。
    pub fn reset(&mut self, user_id: Option<String>) {
        self.user_id = user_id;
        self.fetched = false;
    }
}
