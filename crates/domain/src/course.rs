//! # コース
//!
//! コース一覧の読み取りモデル。

use chrono::{DateTime, Utc};

use crate::{pagination::Cursored, value_objects::SkillLevel};

/// コース一覧の既定ページサイズ
pub const DEFAULT_PAGE_SIZE: u32 = 10;

define_uuid_id! {
    /// コース ID
    pub struct CourseId;
}

define_sort_key! {
    /// コース一覧の並び替えキー
    pub enum CourseSortKey {
        CreatedAt => "createdAt",
        UpdatedAt => "updatedAt",
        Title => "title",
    }
}

/// コース（一覧表示用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id:               CourseId,
    pub title:            String,
    pub slug:             String,
    pub description:      Option<String>,
    pub level:            SkillLevel,
    pub category:         Option<String>,
    pub tags:             Vec<String>,
    pub published:        bool,
    pub featured:         bool,
    pub enrollment_count: i64,
    pub created_at:       DateTime<Utc>,
    pub updated_at:       DateTime<Utc>,
}

impl Cursored for Course {
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
    use rstest::rstest;

    use super::*;
    use crate::pagination::SortKey;

    #[rstest]
    #[case("createdAt", Some(CourseSortKey::CreatedAt))]
    #[case("updatedAt", Some(CourseSortKey::UpdatedAt))]
    #[case("title", Some(CourseSortKey::Title))]
    #[case("viewCount", None)]
    #[case("created_at", None)]
    fn test_ソートキーはフィールド名から解決できる(
        #[case] name: &str,
        #[case] expected: Option<CourseSortKey>,
    ) {
        assert_eq!(CourseSortKey::from_field_name(name), expected);
    }

    #[test]
    fn test_カーソル値はidの文字列表現になる() {
        let now = Utc::now();
        let course = Course {
            id:               CourseId::new(),
            title:            "Rust 入門".to_string(),
            slug:             "rust-intro".to_string(),
            description:      None,
            level:            SkillLevel::Junior,
            category:         None,
            tags:             vec![],
            published:        true,
            featured:         false,
            enrollment_count: 0,
            created_at:       now,
            updated_at:       now,
        };

        assert_eq!(
            course.cursor_value("id"),
            Some(course.id.as_uuid().to_string())
        );
        assert_eq!(course.cursor_value("title"), None);
    }
}
