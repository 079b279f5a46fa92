//! # コース一覧ハンドラ
//!
//! `GET /api/v1/courses`

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use manabi_domain::{
    DomainError,
    course::Course,
    value_objects::{SearchKeyword, TagList, parse_enum_param},
};
use manabi_infra::repository::CourseFilter;
use manabi_shared::{ErrorResponse, PaginatedResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{PaginationParams, paginated};
use crate::{error::ApiError, usecase::CourseUseCaseImpl};

/// コース一覧 API の共有状態
pub struct CourseState {
    pub usecase: CourseUseCaseImpl,
}

/// コース一覧のフィルタ
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCoursesQuery {
    /// 難易度（`JUNIOR` / `SENIOR` / `MASTER`）
    pub level:     Option<String>,
    /// `true` で公開コースのみ、それ以外の値で非公開コースのみ
    pub published: Option<String>,
    /// `true` でおすすめコースのみ、それ以外の値でおすすめ以外のみ
    pub featured:  Option<String>,
    /// カテゴリ（完全一致）
    pub category:  Option<String>,
    /// カンマ区切りのタグ。いずれかを含むコースにマッチする
    pub tags:      Option<String>,
    /// タイトルまたは説明の部分一致（大文字小文字を区別しない）
    pub search:    Option<String>,
}

impl ListCoursesQuery {
    fn into_filter(self) -> Result<CourseFilter, DomainError> {
        Ok(CourseFilter {
            level:     parse_enum_param("難易度", self.level.as_deref())?,
            published: self.published.map(|v| v == "true"),
            featured:  self.featured.map(|v| v == "true"),
            category:  self.category.filter(|v| !v.is_empty()),
            tags:      TagList::parse_optional(self.tags.as_deref()),
            search:    SearchKeyword::parse_optional(self.search.as_deref())?,
        })
    }
}

/// コース一覧の要素データ
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseData {
    pub id:               String,
    pub title:            String,
    pub slug:             String,
    pub description:      Option<String>,
    pub level:            String,
    pub category:         Option<String>,
    pub tags:             Vec<String>,
    pub published:        bool,
    pub featured:         bool,
    pub enrollment_count: i64,
    pub created_at:       String,
    pub updated_at:       String,
}

impl From<Course> for CourseData {
    fn from(course: Course) -> Self {
        Self {
            id:               course.id.to_string(),
            title:            course.title,
            slug:             course.slug,
            description:      course.description,
            level:            course.level.to_string(),
            category:         course.category,
            tags:             course.tags,
            published:        course.published,
            featured:         course.featured,
            enrollment_count: course.enrollment_count,
            created_at:       course.created_at.to_rfc3339(),
            updated_at:       course.updated_at.to_rfc3339(),
        }
    }
}

/// GET /api/v1/courses
///
/// コース一覧を取得する（既定: 新しい順に 10 件）。
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    tag = "courses",
    params(PaginationParams, ListCoursesQuery),
    responses(
        (status = 200, description = "コース一覧", body = PaginatedResponse<CourseData>),
        (status = 400, description = "不正なソートフィールド・フィルタ・カーソル", body = ErrorResponse),
        (status = 500, description = "内部エラー", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_courses(
    State(state): State<Arc<CourseState>>,
    Query(params): Query<HashMap<String, String>>,
    query: Result<Query<ListCoursesQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let page = state.usecase.list_courses(&params, &filter).await?;

    Ok((StatusCode::OK, Json(paginated(page, CourseData::from))))
}
