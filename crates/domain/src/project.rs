//! # プロジェクト
//!
//! 共同プロジェクト一覧の読み取りモデルとステータス。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{
    pagination::Cursored,
    value_objects::{SkillLevel, UserId},
};

/// プロジェクト一覧の既定ページサイズ（3 列グリッド × 4 行）
pub const DEFAULT_PAGE_SIZE: u32 = 12;

define_uuid_id! {
    /// プロジェクト ID
    pub struct ProjectId;
}

define_sort_key! {
    /// プロジェクト一覧の並び替えキー
    pub enum ProjectSortKey {
        CreatedAt => "createdAt",
        UpdatedAt => "updatedAt",
        Title => "title",
    }
}

/// プロジェクトステータス
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
    Archived,
}

/// プロジェクト（一覧表示用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id:           ProjectId,
    pub title:        String,
    pub description:  Option<String>,
    pub level:        SkillLevel,
    pub status:       ProjectStatus,
    pub owner_id:     UserId,
    pub member_count: i64,
    pub created_at:   DateTime<Utc>,
    pub updated_at:   DateTime<Utc>,
}

impl Cursored for Project {
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

    #[test]
    fn test_in_progressは大文字スネークケースで表現される() {
        assert_eq!(ProjectStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(
            "IN_PROGRESS".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::InProgress
        );
    }
}
