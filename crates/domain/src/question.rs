//! # Q&A 質問
//!
//! 質問一覧の読み取りモデルとステータス。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{DomainError, pagination::Cursored, value_objects::UserId};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

define_uuid_id! {
    /// 質問 ID
    pub struct QuestionId;
}

define_sort_key! {
    /// 質問一覧の並び替えキー
    pub enum QuestionSortKey {
        CreatedAt => "createdAt",
        UpdatedAt => "updatedAt",
        Title => "title",
        ViewCount => "viewCount",
        VoteCount => "voteCount",
        AnswerCount => "answerCount",
    }
}

/// 質問ステータス
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
pub enum QuestionStatus {
    Open,
    Answered,
    Closed,
}

impl QuestionStatus {
    /// ステータスフィルタをパースする
    ///
    /// `ALL` と未指定はフィルタなし。
    pub fn parse_filter(raw: Option<&str>) -> Result<Option<Self>, DomainError> {
        match raw.map(str::trim) {
            None | Some("") | Some("ALL") => Ok(None),
            Some(value) => value.parse().map(Some).map_err(|_| {
                DomainError::Validation(format!("ステータスの値が不正です: {value}"))
            }),
        }
    }
}

/// 質問（一覧表示用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id:           QuestionId,
    pub title:        String,
    pub tags:         Vec<String>,
    pub status:       QuestionStatus,
    pub author_id:    UserId,
    pub view_count:   i64,
    pub vote_count:   i64,
    pub answer_count: i64,
    /// 懸賞ポイント（なしは `None`）
    pub bounty:       Option<i32>,
    pub created_at:   DateTime<Utc>,
    pub updated_at:   DateTime<Utc>,
}

impl Cursored for Question {
    fn cursor_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            _ => None,
        }
    }
}
