//! # 学習レポート
//!
//! レポート一覧の読み取りモデル。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{pagination::Cursored, value_objects::UserId};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

define_uuid_id! {
    /// レポート ID
    pub struct ReportId;
}

define_sort_key! {
    /// レポート一覧の並び替えキー
    pub enum ReportSortKey {
        CreatedAt => "createdAt",
        UpdatedAt => "updatedAt",
        Title => "title",
    }
}

/// レポートステータス
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
pub enum ReportStatus {
    Draft,
    Published,
}

/// レポート（一覧表示用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id:         ReportId,
    pub title:      String,
    pub summary:    Option<String>,
    pub status:     ReportStatus,
    pub author_id:  UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cursored for Report {
    fn cursor_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            _ => None,
        }
    }
}
