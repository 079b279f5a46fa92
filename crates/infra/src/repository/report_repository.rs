//! # ReportRepository
//!
//! 学習レポート一覧の取得。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use manabi_domain::{
    pagination::FetchSpec,
    report::{Report, ReportId, ReportSortKey, ReportStatus},
    value_objects::{SearchKeyword, UserId},
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{
    parse_db_enum,
    seek::{self, SeekQuery, SortColumn},
};
use crate::error::InfraError;

const TABLE: &str = "reports";
const COLUMNS: &str = "id, title, summary, status, author_id, created_at, updated_at";

/// レポート一覧のフィルタ条件
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    /// タイトルの部分一致
    pub search: Option<SearchKeyword>,
}

impl ReportFilter {
    pub fn matches(&self, report: &Report) -> bool {
        self.status.is_none_or(|status| report.status == status)
            && self
                .search
                .as_ref()
                .is_none_or(|keyword| keyword.matches(&report.title))
    }
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// 取得仕様に従って最大 `take` 行を返す
    async fn find_page(
        &self,
        filter: &ReportFilter,
        spec: &FetchSpec<ReportSortKey>,
    ) -> Result<Vec<Report>, InfraError>;
}

impl SortColumn for ReportSortKey {
    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Title => "title",
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    id:         Uuid,
    title:      String,
    summary:    Option<String>,
    status:     String,
    author_id:  Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ReportRow> for Report {
    type Error = InfraError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id:         ReportId::from_uuid(row.id),
            status:     parse_db_enum("reports.status", &row.status)?,
            title:      row.title,
            summary:    row.summary,
            author_id:  UserId::from_uuid(row.author_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn build_list_query(
    filter: &ReportFilter,
    spec: &FetchSpec<ReportSortKey>,
    anchor: Option<Uuid>,
) -> QueryBuilder<'static, Postgres> {
    let mut query = SeekQuery::select(COLUMNS, TABLE);

    if let Some(status) = filter.status {
        query
            .and_where()
            .push("status = ")
            .push_bind(status.to_string());
    }
    if let Some(keyword) = &filter.search {
        query
            .and_where()
            .push("title ILIKE ")
            .push_bind(keyword.to_like_pattern());
    }

    query.finish(spec, anchor)
}

/// PostgreSQL 実装の ReportRepository
#[derive(Debug, Clone)]
pub struct PostgresReportRepository {
    pool: PgPool,
}

impl PostgresReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(order_by = %spec.order.field, take = spec.take)
    )]
    async fn find_page(
        &self,
        filter: &ReportFilter,
        spec: &FetchSpec<ReportSortKey>,
    ) -> Result<Vec<Report>, InfraError> {
        let anchor = seek::resolve_anchor(&self.pool, TABLE, spec).await?;

        let rows: Vec<ReportRow> = build_list_query(filter, spec, anchor)
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Report::try_from).collect()
    }
}
