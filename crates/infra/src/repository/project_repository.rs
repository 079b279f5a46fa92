//! # ProjectRepository
//!
//! 共同プロジェクト一覧の取得。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use manabi_domain::{
    pagination::FetchSpec,
    project::{Project, ProjectId, ProjectSortKey, ProjectStatus},
    value_objects::{SkillLevel, UserId},
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{
    parse_db_enum,
    seek::{self, SeekQuery, SortColumn},
};
use crate::error::InfraError;

const TABLE: &str = "projects";
const COLUMNS: &str =
    "id, title, description, level, status, owner_id, member_count, created_at, updated_at";

/// プロジェクト一覧のフィルタ条件
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub level:  Option<SkillLevel>,
    pub status: Option<ProjectStatus>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        self.level.is_none_or(|level| project.level == level)
            && self.status.is_none_or(|status| project.status == status)
    }
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// 取得仕様に従って最大 `take` 行を返す
    async fn find_page(
        &self,
        filter: &ProjectFilter,
        spec: &FetchSpec<ProjectSortKey>,
    ) -> Result<Vec<Project>, InfraError>;
}

impl SortColumn for ProjectSortKey {
    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Title => "title",
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id:           Uuid,
    title:        String,
    description:  Option<String>,
    level:        String,
    status:       String,
    owner_id:     Uuid,
    member_count: i64,
    created_at:   DateTime<Utc>,
    updated_at:   DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = InfraError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id:           ProjectId::from_uuid(row.id),
            level:        parse_db_enum("projects.level", &row.level)?,
            status:       parse_db_enum("projects.status", &row.status)?,
            title:        row.title,
            description:  row.description,
            owner_id:     UserId::from_uuid(row.owner_id),
            member_count: row.member_count,
            created_at:   row.created_at,
            updated_at:   row.updated_at,
        })
    }
}

fn build_list_query(
    filter: &ProjectFilter,
    spec: &FetchSpec<ProjectSortKey>,
    anchor: Option<Uuid>,
) -> QueryBuilder<'static, Postgres> {
    let mut query = SeekQuery::select(COLUMNS, TABLE);

    if let Some(level) = filter.level {
        query.and_where().push("level = ").push_bind(level.to_string());
    }
    if let Some(status) = filter.status {
        query
            .and_where()
            .push("status = ")
            .push_bind(status.to_string());
    }

    query.finish(spec, anchor)
}

/// PostgreSQL 実装の ProjectRepository
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(order_by = %spec.order.field, take = spec.take)
    )]
    async fn find_page(
        &self,
        filter: &ProjectFilter,
        spec: &FetchSpec<ProjectSortKey>,
    ) -> Result<Vec<Project>, InfraError> {
        let anchor = seek::resolve_anchor(&self.pool, TABLE, spec).await?;

        let rows: Vec<ProjectRow> = build_list_query(filter, spec, anchor)
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Project::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use manabi_domain::pagination::{OrderBy, SortDirection};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_レベルとステータスで絞り込むsql() {
        let filter = ProjectFilter {
            level:  Some(SkillLevel::Master),
            status: Some(ProjectStatus::InProgress),
        };
        let spec = FetchSpec {
            take:   13,
            skip:   0,
            cursor: None,
            order:  OrderBy {
                field:     ProjectSortKey::CreatedAt,
                direction: SortDirection::Desc,
            },
        };

        let builder = build_list_query(&filter, &spec, None);

        assert_eq!(
            builder.sql(),
            format!(
                "SELECT {COLUMNS} FROM projects WHERE level = $1 AND status = $2 \
                 ORDER BY created_at DESC, id DESC LIMIT $3"
            )
        );
    }

    #[test]
    fn test_フィルタは全条件に一致する行だけを通す() {
        let now = Utc::now();
        let project = Project {
            id:           ProjectId::new(),
            title:        "OSS 翻訳".to_string(),
            description:  None,
            level:        SkillLevel::Master,
            status:       ProjectStatus::Planning,
            owner_id:     UserId::new(),
            member_count: 3,
            created_at:   now,
            updated_at:   now,
        };

        let by_level = ProjectFilter {
            level: Some(SkillLevel::Master),
            ..Default::default()
        };
        let by_both = ProjectFilter {
            level:  Some(SkillLevel::Master),
            status: Some(ProjectStatus::Completed),
        };

        assert!(by_level.matches(&project));
        assert!(!by_both.matches(&project));
    }
}
