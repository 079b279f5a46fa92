//! # フォーラム投稿
//!
//! 投稿一覧の読み取りモデル。本文は一覧に含めない。

use chrono::{DateTime, Utc};

use crate::{pagination::Cursored, value_objects::UserId};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

define_uuid_id! {
    /// 投稿 ID
    pub struct PostId;
}

define_sort_key! {
    /// 投稿一覧の並び替えキー
    pub enum PostSortKey {
        CreatedAt => "createdAt",
        UpdatedAt => "updatedAt",
        Title => "title",
        ViewCount => "viewCount",
    }
}

/// 投稿（一覧表示用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id:            PostId,
    pub title:         String,
    pub slug:          String,
    pub excerpt:       Option<String>,
    pub tags:          Vec<String>,
    pub author_id:     UserId,
    pub view_count:    i64,
    pub comment_count: i64,
    pub created_at:    DateTime<Utc>,
    pub updated_at:    DateTime<Utc>,
}

impl Cursored for Post {
    fn cursor_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pagination::SortKey;

    #[test]
    fn test_view_countで並び替えできる() {
        assert_eq!(
            PostSortKey::from_field_name("viewCount"),
            Some(PostSortKey::ViewCount)
        );
        assert_eq!(PostSortKey::ViewCount.to_string(), "viewCount");
    }

    #[test]
    fn test_指定可能なフィールドは宣言順に並ぶ() {
        assert_eq!(
            PostSortKey::allowed_field_names(),
            vec!["createdAt", "updatedAt", "title", "viewCount"]
        );
    }
}
