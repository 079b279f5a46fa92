//! # QuestionRepository
//!
//! Q&A 質問一覧の取得。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use manabi_domain::{
    pagination::FetchSpec,
    question::{Question, QuestionId, QuestionSortKey, QuestionStatus},
    value_objects::{SearchKeyword, TagList, UserId},
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{
    parse_db_enum,
    seek::{self, SeekQuery, SortColumn},
};
use crate::error::InfraError;

const TABLE: &str = "questions";
const COLUMNS: &str = "id, title, tags, status, author_id, view_count, vote_count, answer_count, \
                       bounty, created_at, updated_at";

/// 質問一覧のフィルタ条件
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    pub status:     Option<QuestionStatus>,
    pub tags:       Option<TagList>,
    pub author_id:  Option<UserId>,
    /// `true` なら懸賞ポイントが正の質問のみ
    pub has_bounty: bool,
    pub search:     Option<SearchKeyword>,
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        self.status.is_none_or(|status| question.status == status)
            && self
                .tags
                .as_ref()
                .is_none_or(|tags| tags.matches_any(&question.tags))
            && self
                .author_id
                .as_ref()
                .is_none_or(|author_id| question.author_id == *author_id)
            && (!self.has_bounty || question.bounty.is_some_and(|bounty| bounty > 0))
            && self
                .search
                .as_ref()
                .is_none_or(|keyword| keyword.matches(&question.title))
    }
}

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// 取得仕様に従って最大 `take` 行を返す
    async fn find_page(
        &self,
        filter: &QuestionFilter,
        spec: &FetchSpec<QuestionSortKey>,
    ) -> Result<Vec<Question>, InfraError>;
}

impl SortColumn for QuestionSortKey {
    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Title => "title",
            Self::ViewCount => "view_count",
            Self::VoteCount => "vote_count",
            Self::AnswerCount => "answer_count",
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct QuestionRow {
    id:           Uuid,
    title:        String,
    tags:         Vec<String>,
    status:       String,
    author_id:    Uuid,
    view_count:   i64,
    vote_count:   i64,
    answer_count: i64,
    bounty:       Option<i32>,
    created_at:   DateTime<Utc>,
    updated_at:   DateTime<Utc>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = InfraError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id:           QuestionId::from_uuid(row.id),
            status:       parse_db_enum("questions.status", &row.status)?,
            title:        row.title,
            tags:         row.tags,
            author_id:    UserId::from_uuid(row.author_id),
            view_count:   row.view_count,
            vote_count:   row.vote_count,
            answer_count: row.answer_count,
            bounty:       row.bounty,
            created_at:   row.created_at,
            updated_at:   row.updated_at,
        })
    }
}

fn build_list_query(
    filter: &QuestionFilter,
    spec: &FetchSpec<QuestionSortKey>,
    anchor: Option<Uuid>,
) -> QueryBuilder<'static, Postgres> {
    let mut query = SeekQuery::select(COLUMNS, TABLE);

    if let Some(status) = filter.status {
        query
            .and_where()
            .push("status = ")
            .push_bind(status.to_string());
    }
    if let Some(tags) = &filter.tags {
        query
            .and_where()
            .push("tags && ")
            .push_bind(tags.as_slice().to_vec());
    }
    if let Some(author_id) = &filter.author_id {
        query
            .and_where()
            .push("author_id = ")
            .push_bind(*author_id.as_uuid());
    }
    if filter.has_bounty {
        query.and_where().push("bounty > 0");
    }
    if let Some(keyword) = &filter.search {
        query
            .and_where()
            .push("title ILIKE ")
            .push_bind(keyword.to_like_pattern());
    }

    query.finish(spec, anchor)
}

/// PostgreSQL 実装の QuestionRepository
#[derive(Debug, Clone)]
pub struct PostgresQuestionRepository {
    pool: PgPool,
}

impl PostgresQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for PostgresQuestionRepository {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(order_by = %spec.order.field, take = spec.take)
    )]
    async fn find_page(
        &self,
        filter: &QuestionFilter,
        spec: &FetchSpec<QuestionSortKey>,
    ) -> Result<Vec<Question>, InfraError> {
        let anchor = seek::resolve_anchor(&self.pool, TABLE, spec).await?;

        let rows: Vec<QuestionRow> = build_list_query(filter, spec, anchor)
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Question::try_from).collect()
    }
}
