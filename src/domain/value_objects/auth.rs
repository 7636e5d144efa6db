use serde::{Deserialize, Serialize};

/// 呼び出し元の認証状態。UI層から各ミューテーションに引き渡される。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthContext {
    pub is_authenticated: bool,
    pub user_id: Option<String>,
}

impl AuthContext {
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            user_id: Some(user_id.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}
