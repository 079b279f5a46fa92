//! # 投稿一覧ハンドラ
//!
//! `GET /api/v1/posts`

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use manabi_domain::{
    DomainError,
    post::Post,
    value_objects::{SearchKeyword, TagList},
};
use manabi_infra::repository::PostFilter;
use manabi_shared::{ErrorResponse, PaginatedResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{PaginationParams, paginated};
use crate::{error::ApiError, usecase::PostUseCaseImpl};

pub struct PostState {
    pub usecase: PostUseCaseImpl,
}

/// 投稿一覧のフィルタ
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPostsQuery {
    /// カンマ区切りのタグ。いずれかを含む投稿にマッチする
    pub tags:   Option<String>,
    /// タイトルの部分一致
    pub search: Option<String>,
}

impl ListPostsQuery {
    fn into_filter(self) -> Result<PostFilter, DomainError> {
        Ok(PostFilter {
            tags:   TagList::parse_optional(self.tags.as_deref()),
            search: SearchKeyword::parse_optional(self.search.as_deref())?,
        })
    }
}

/// 投稿一覧の要素データ
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    pub id:            String,
    pub title:         String,
    pub slug:          String,
    pub excerpt:       Option<String>,
    pub tags:          Vec<String>,
    pub author_id:     String,
    pub view_count:    i64,
    pub comment_count: i64,
    pub created_at:    String,
    pub updated_at:    String,
}

impl From<Post> for PostData {
    fn from(post: Post) -> Self {
        Self {
            id:            post.id.to_string(),
            title:         post.title,
            slug:          post.slug,
            excerpt:       post.excerpt,
            tags:          post.tags,
            author_id:     post.author_id.to_string(),
            view_count:    post.view_count,
            comment_count: post.comment_count,
            created_at:    post.created_at.to_rfc3339(),
            updated_at:    post.updated_at.to_rfc3339(),
        }
    }
}

/// GET /api/v1/posts
///
/// 投稿一覧を取得する（既定: 新しい順に 20 件）。
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "posts",
    params(PaginationParams, ListPostsQuery),
    responses(
        (status = 200, description = "投稿一覧", body = PaginatedResponse<PostData>),
        (status = 400, description = "不正なソートフィールド・フィルタ・カーソル", body = ErrorResponse),
        (status = 500, description = "内部エラー", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_posts(
    State(state): State<Arc<PostState>>,
    Query(params): Query<HashMap<String, String>>,
    query: Result<Query<ListPostsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let page = state.usecase.list_posts(&params, &filter).await?;

    Ok((StatusCode::OK, Json(paginated(page, PostData::from))))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some(" , "), None)]
    #[case(Some("rust, axum"), Some(vec!["rust", "axum"]))]
    fn test_タグのフィルタを解釈する(
        #[case] raw: Option<&str>,
        #[case] expected: Option<Vec<&str>>,
    ) {
        let query = ListPostsQuery {
            tags:   raw.map(str::to_string),
            search: None,
        };

        let filter = query.into_filter().unwrap();

        assert_eq!(
            filter.tags.map(TagList::into_vec),
            expected.map(|tags| tags.into_iter().map(str::to_string).collect())
        );
    }

    #[test]
    fn test_長すぎる検索キーワードは検証エラー() {
        let query = ListPostsQuery {
            tags:   None,
            search: Some("a".repeat(101)),
        };

        assert!(matches!(
            query.into_filter(),
            Err(DomainError::Validation(_))
        ));
    }
}
