//! # CourseRepository
//!
//! コース一覧の取得。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use manabi_domain::{
    course::{Course, CourseId, CourseSortKey},
    pagination::FetchSpec,
    value_objects::{SearchKeyword, SkillLevel, TagList},
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{
    parse_db_enum,
    seek::{self, SeekQuery, SortColumn},
};
use crate::error::InfraError;

const TABLE: &str = "courses";
const COLUMNS: &str = "id, title, slug, description, level, category, tags, published, featured, \
                       enrollment_count, created_at, updated_at";

/// コース一覧のフィルタ条件
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub level:     Option<SkillLevel>,
    pub published: Option<bool>,
    pub featured:  Option<bool>,
    /// カテゴリの完全一致
    pub category:  Option<String>,
    pub tags:      Option<TagList>,
    /// タイトルまたは説明の部分一致
    pub search:    Option<SearchKeyword>,
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        self.level.is_none_or(|level| course.level == level)
            && self.published.is_none_or(|published| course.published == published)
            && self.featured.is_none_or(|featured| course.featured == featured)
            && self
                .category
                .as_deref()
                .is_none_or(|category| course.category.as_deref() == Some(category))
            && self
                .tags
                .as_ref()
                .is_none_or(|tags| tags.matches_any(&course.tags))
            && self.search.as_ref().is_none_or(|keyword| {
                keyword.matches(&course.title)
                    || course
                        .description
                        .as_deref()
                        .is_some_and(|d| keyword.matches(d))
            })
    }
}

/// コースリポジトリトレイト
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// 取得仕様に従って最大 `take` 行を返す
    async fn find_page(
        &self,
        filter: &CourseFilter,
        spec: &FetchSpec<CourseSortKey>,
    ) -> Result<Vec<Course>, InfraError>;
}

impl SortColumn for CourseSortKey {
    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Title => "title",
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CourseRow {
    id:               Uuid,
    title:            String,
    slug:             String,
    description:      Option<String>,
    level:            String,
    category:         Option<String>,
    tags:             Vec<String>,
    published:        bool,
    featured:         bool,
    enrollment_count: i64,
    created_at:       DateTime<Utc>,
    updated_at:       DateTime<Utc>,
}

impl TryFrom<CourseRow> for Course {
    type Error = InfraError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id:               CourseId::from_uuid(row.id),
            level:            parse_db_enum("courses.level", &row.level)?,
            title:            row.title,
            slug:             row.slug,
            description:      row.description,
            category:         row.category,
            tags:             row.tags,
            published:        row.published,
            featured:         row.featured,
            enrollment_count: row.enrollment_count,
            created_at:       row.created_at,
            updated_at:       row.updated_at,
        })
    }
}

fn build_list_query(
    filter: &CourseFilter,
    spec: &FetchSpec<CourseSortKey>,
    anchor: Option<Uuid>,
) -> QueryBuilder<'static, Postgres> {
    let mut query = SeekQuery::select(COLUMNS, TABLE);

    if let Some(level) = filter.level {
        query.and_where().push("level = ").push_bind(level.to_string());
    }
    if let Some(published) = filter.published {
        query.and_where().push("published = ").push_bind(published);
    }
    if let Some(featured) = filter.featured {
        query.and_where().push("featured = ").push_bind(featured);
    }
    if let Some(category) = &filter.category {
        query.and_where().push("category = ").push_bind(category.clone());
    }
    if let Some(tags) = &filter.tags {
        query
            .and_where()
            .push("tags && ")
            .push_bind(tags.as_slice().to_vec());
    }
    if let Some(keyword) = &filter.search {
        let pattern = keyword.to_like_pattern();
        query
            .and_where()
            .push("(title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    query.finish(spec, anchor)
}

/// PostgreSQL 実装の CourseRepository
#[derive(Debug, Clone)]
pub struct PostgresCourseRepository {
    pool: PgPool,
}

impl PostgresCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PostgresCourseRepository {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(order_by = %spec.order.field, take = spec.take)
    )]
    async fn find_page(
        &self,
        filter: &CourseFilter,
        spec: &FetchSpec<CourseSortKey>,
    ) -> Result<Vec<Course>, InfraError> {
        let anchor = seek::resolve_anchor(&self.pool, TABLE, spec).await?;

        let rows: Vec<CourseRow> = build_list_query(filter, spec, anchor)
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Course::try_from).collect()
    }
}
