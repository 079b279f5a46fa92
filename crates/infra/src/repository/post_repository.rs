//! # PostRepository
//!
//! フォーラム投稿一覧の取得。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use manabi_domain::{
    pagination::FetchSpec,
    post::{Post, PostId, PostSortKey},
    value_objects::{SearchKeyword, TagList, UserId},
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::seek::{self, SeekQuery, SortColumn};
use crate::error::InfraError;

const TABLE: &str = "posts";
const COLUMNS: &str =
    "id, title, slug, excerpt, tags, author_id, view_count, comment_count, created_at, updated_at";

/// 投稿一覧のフィルタ条件
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// いずれかのタグを含む
    pub tags:   Option<TagList>,
    pub search: Option<SearchKeyword>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        self.tags.as_ref().is_none_or(|tags| tags.matches_any(&post.tags))
            && self
                .search
                .as_ref()
                .is_none_or(|keyword| keyword.matches(&post.title))
    }
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// 取得仕様に従って最大 `take` 行を返す
    async fn find_page(
        &self,
        filter: &PostFilter,
        spec: &FetchSpec<PostSortKey>,
    ) -> Result<Vec<Post>, InfraError>;
}

impl SortColumn for PostSortKey {
    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Title => "title",
            Self::ViewCount => "view_count",
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id:            Uuid,
    title:         String,
    slug:          String,
    excerpt:       Option<String>,
    tags:          Vec<String>,
    author_id:     Uuid,
    view_count:    i64,
    comment_count: i64,
    created_at:    DateTime<Utc>,
    updated_at:    DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id:            PostId::from_uuid(row.id),
            title:         row.title,
            slug:          row.slug,
            excerpt:       row.excerpt,
            tags:          row.tags,
            author_id:     UserId::from_uuid(row.author_id),
            view_count:    row.view_count,
            comment_count: row.comment_count,
            created_at:    row.created_at,
            updated_at:    row.updated_at,
        }
    }
}

fn build_list_query(
    filter: &PostFilter,
    spec: &FetchSpec<PostSortKey>,
    anchor: Option<Uuid>,
) -> QueryBuilder<'static, Postgres> {
    let mut query = SeekQuery::select(COLUMNS, TABLE);

    if let Some(tags) = &filter.tags {
        query
            .and_where()
            .push("tags && ")
            .push_bind(tags.as_slice().to_vec());
    }
    if let Some(keyword) = &filter.search {
        query
            .and_where()
            .push("title ILIKE ")
            .push_bind(keyword.to_like_pattern());
    }

    query.finish(spec, anchor)
}

/// PostgreSQL 実装の PostRepository
#[derive(Debug, Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(order_by = %spec.order.field, take = spec.take)
    )]
    async fn find_page(
        &self,
        filter: &PostFilter,
        spec: &FetchSpec<PostSortKey>,
    ) -> Result<Vec<Post>, InfraError> {
        let anchor = seek::resolve_anchor(&self.pool, TABLE, spec).await?;

        let rows: Vec<PostRow> = build_list_query(filter, spec, anchor)
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use manabi_domain::pagination::{CursorAnchor, OrderBy, SortDirection};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_タグと検索とカーソルを組み合わせたsql() {
        let filter = PostFilter {
            tags:   TagList::parse_optional(Some("rust,go")),
            search: Some(SearchKeyword::new("async").unwrap()),
        };
        let anchor = Uuid::now_v7();
        let spec = FetchSpec {
            take:   21,
            skip:   1,
            cursor: Some(CursorAnchor {
                field: "id".to_string(),
                value: anchor.to_string(),
            }),
            order:  OrderBy {
                field:     PostSortKey::ViewCount,
                direction: SortDirection::Desc,
            },
        };

        let builder = build_list_query(&filter, &spec, Some(anchor));

        assert_eq!(
            builder.sql(),
            format!(
                "SELECT {COLUMNS} FROM posts WHERE tags && $1 AND title ILIKE $2 \
                 AND (view_count, id) < (SELECT view_count, id FROM posts WHERE id = $3) \
                 ORDER BY view_count DESC, id DESC LIMIT $4"
            )
        );
    }
}
