use serde::{Deserialize, Serialize};

/// コメント1件のリアクション状態。
///
/// `is_liked` carries the user's intent; `like_count` is server-derived
/// and saturates at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionState {
    pub entity_id: i64,
    pub is_liked: bool,
    pub like_count: u32,
}

/// like/unlike エンドポイントが返す部分的なサーバー応答。
///
/// Some endpoints answer `204 No Content`; others return a DTO stripped
/// of `is_liked`. Every field besides `id` is therefore optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentDto {
    pub id: i64,
    #[serde(default)]
    pub likes_count: Option<u32>,
    #[serde(default)]
    pub is_liked: Option<bool>,
}

impl ReactionState {
    pub fn new(entity_id: i64, is_liked: bool, like_count: u32) -> Self {
        Self {
            entity_id,
            is_liked,
            like_count,
        }
    }

    /// 楽観的にLiked状態へ遷移した複製を返す
    pub fn liked(&self) -> Self {
        Self {
            entity_id: self.entity_id,
            is_liked: true,
            like_count: self.like_count + 1,
        }
    }

    /// 楽観的にUnliked状態へ遷移した複製を返す
    pub fn unliked(&self) -> Self {
        Self {
            entity_id: self.entity_id,
            is_liked: false,
            like_count: self.like_count.saturating_sub(1),
        }
    }

    /// フィールド保持マージ
    ///
    /// Adopts server-authoritative fields that are present and keeps the
    /// client's last-known value for any the response omits. Treating a
    /// missing `is_liked` as `false` is the failure mode this guards
    /// against.
    pub fn merge_server(&self, dto: &CommentDto) -> Self {
        Self {
            entity_id: self.entity_id,
            is_liked: dto.is_liked.unwrap_or(self.is_liked),
            like_count: dto.likes_count.unwrap_or(self.like_count),
        }
    }
}
