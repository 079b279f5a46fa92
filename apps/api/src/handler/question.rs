//! # 質問一覧ハンドラ
//!
//! `GET /api/v1/questions`

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use manabi_domain::{
    DomainError,
    question::{Question, QuestionStatus},
    value_objects::{SearchKeyword, TagList, UserId},
};
use manabi_infra::repository::QuestionFilter;
use manabi_shared::{ErrorResponse, PaginatedResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{PaginationParams, paginated};
use crate::{error::ApiError, usecase::QuestionUseCaseImpl};

pub struct QuestionState {
    pub usecase: QuestionUseCaseImpl,
}

/// 質問一覧のフィルタ
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuestionsQuery {
    /// `OPEN` / `ANSWERED` / `CLOSED`。`ALL` は絞り込みなし
    pub status:     Option<String>,
    /// カンマ区切りのタグ。いずれかを含む質問にマッチする
    pub tags:       Option<String>,
    /// 作成者のユーザー ID
    pub author_id:  Option<String>,
    /// `true` で懸賞付きの質問のみ
    pub has_bounty: Option<String>,
    /// タイトルの部分一致
    pub search:     Option<String>,
}

impl ListQuestionsQuery {
    fn into_filter(self) -> Result<QuestionFilter, DomainError> {
        Ok(QuestionFilter {
            status:     QuestionStatus::parse_filter(self.status.as_deref())?,
            tags:       TagList::parse_optional(self.tags.as_deref()),
            author_id:  UserId::parse_optional(self.author_id.as_deref())?,
            has_bounty: self.has_bounty.as_deref() == Some("true"),
            search:     SearchKeyword::parse_optional(self.search.as_deref())?,
        })
    }
}

/// 質問一覧の要素データ
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionData {
    pub id:           String,
    pub title:        String,
    pub tags:         Vec<String>,
    pub status:       String,
    pub author_id:    String,
    pub view_count:   i64,
    pub vote_count:   i64,
    pub answer_count: i64,
    pub bounty:       Option<i32>,
    pub created_at:   String,
    pub updated_at:   String,
}

impl From<Question> for QuestionData {
    fn from(question: Question) -> Self {
        Self {
            id:           question.id.to_string(),
            title:        question.title,
            tags:         question.tags,
            status:       question.status.to_string(),
            author_id:    question.author_id.to_string(),
            view_count:   question.view_count,
            vote_count:   question.vote_count,
            answer_count: question.answer_count,
            bounty:       question.bounty,
            created_at:   question.created_at.to_rfc3339(),
            updated_at:   question.updated_at.to_rfc3339(),
        }
    }
}

/// GET /api/v1/questions
///
/// 質問一覧を取得する（既定: 新しい順に 20 件）。
#[utoipa::path(
    get,
    path = "/api/v1/questions",
    tag = "questions",
    params(PaginationParams, ListQuestionsQuery),
    responses(
        (status = 200, description = "質問一覧", body = PaginatedResponse<QuestionData>),
        (status = 400, description = "不正なソートフィールド・フィルタ・カーソル", body = ErrorResponse),
        (status = 500, description = "内部エラー", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_questions(
    State(state): State<Arc<QuestionState>>,
    Query(params): Query<HashMap<String, String>>,
    query: Result<Query<ListQuestionsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let page = state.usecase.list_questions(&params, &filter).await?;

    Ok((StatusCode::OK, Json(paginated(page, QuestionData::from))))
}
