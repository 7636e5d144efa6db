use serde::{Deserialize, Serialize};
use std::fmt;

/// トグル対象のリソース種別
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    Travel,
    Article,
    CommentLike,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Travel => "travel",
            ResourceType::Article => "article",
            ResourceType::CommentLike => "comment-like",
        }
    }

    /// サーバー側にミラーが存在するリソースか
    ///
    /// Articles have no backend favorites endpoint; they are persisted
    /// locally even for authenticated users.
    pub fn is_server_tracked(&self) -> bool {
        matches!(self, ResourceType::Travel | ResourceType::CommentLike)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// キャッシュ参照と実行中ミューテーションの重複排除に使う複合キー
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToggleKey {
    pub resource_type: ResourceType,
    pub resource_id: String,
}

impl ToggleKey {
    pub fn new(resource_type: ResourceType, resource_id: impl Into<String>) -> Self {
        Self {
            resource_type,
            resource_id: resource_id.into(),
        }
    }

    pub fn comment_like(comment_id: i64) -> Self {
        Self::new(ResourceType::CommentLike, comment_id.to_string())
    }
}

impl fmt::Display for ToggleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource_id)
    }
}
