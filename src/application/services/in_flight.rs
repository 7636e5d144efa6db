use crate::domain::value_objects::ToggleKey;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// ネットワーク応答待ちのミューテーションを追跡する集合。
///
/// Guarantees at most one outstanding mutation per key: a second call for
/// a key already in the set must be treated as a silent no-op by the
/// coordinator. The lock is synchronous and never held across an await.
#[derive(Debug, Clone, Default)]
pub struct InFlightSet {
    keys: Arc<Mutex<HashSet<ToggleKey>>>,
}

impl InFlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// キーを登録する。既に実行中なら false。
    pub fn try_begin(&self, key: &ToggleKey) -> bool {
        let mut keys = self.keys.lock().expect("in-flight set poisoned");
        keys.insert(key.clone())
    }

    /// ミューテーション完了・失敗時の登録解除。全ての復帰パスで呼ぶこと。
    pub fn finish(&self, key: &ToggleKey) {
        let mut keys = self.keys.lock().expect("in-flight set poisoned");
        keys.remove(key);
    }

    pub fn contains(&self, key: &ToggleKey) -> bool {
        let keys = self.keys.lock().expect("in-flight set poisoned");
        keys.contains(key)
    }
}
