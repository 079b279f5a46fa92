//! # プロジェクト一覧ハンドラ
//!
//! `GET /api/v1/projects`

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use manabi_domain::{DomainError, project::Project, value_objects::parse_enum_param};
use manabi_infra::repository::ProjectFilter;
use manabi_shared::{ErrorResponse, PaginatedResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{PaginationParams, paginated};
use crate::{error::ApiError, usecase::ProjectUseCaseImpl};

pub struct ProjectState {
    pub usecase: ProjectUseCaseImpl,
}

/// プロジェクト一覧のフィルタ
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProjectsQuery {
    /// 難易度（`JUNIOR` / `SENIOR` / `MASTER`）
    pub level:  Option<String>,
    /// `PLANNING` / `IN_PROGRESS` / `COMPLETED` / `ARCHIVED`
    pub status: Option<String>,
}

impl ListProjectsQuery {
    fn into_filter(self) -> Result<ProjectFilter, DomainError> {
        Ok(ProjectFilter {
            level:  parse_enum_param("難易度", self.level.as_deref())?,
            status: parse_enum_param("ステータス", self.status.as_deref())?,
        })
    }
}

/// プロジェクト一覧の要素データ
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub id:           String,
    pub title:        String,
    pub description:  Option<String>,
    pub level:        String,
    pub status:       String,
    pub owner_id:     String,
    pub member_count: i64,
    pub created_at:   String,
    pub updated_at:   String,
}

impl From<Project> for ProjectData {
    fn from(project: Project) -> Self {
        Self {
            id:           project.id.to_string(),
            title:        project.title,
            description:  project.description,
            level:        project.level.to_string(),
            status:       project.status.to_string(),
            owner_id:     project.owner_id.to_string(),
            member_count: project.member_count,
            created_at:   project.created_at.to_rfc3339(),
            updated_at:   project.updated_at.to_rfc3339(),
        }
    }
}

/// GET /api/v1/projects
///
/// プロジェクト一覧を取得する（既定: 新しい順に 12 件）。
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "projects",
    params(PaginationParams, ListProjectsQuery),
    responses(
        (status = 200, description = "プロジェクト一覧", body = PaginatedResponse<ProjectData>),
        (status = 400, description = "不正なソートフィールド・フィルタ・カーソル", body = ErrorResponse),
        (status = 500, description = "内部エラー", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_projects(
    State(state): State<Arc<ProjectState>>,
    Query(params): Query<HashMap<String, String>>,
    query: Result<Query<ListProjectsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let page = state.usecase.list_projects(&params, &filter).await?;

    Ok((StatusCode::OK, Json(paginated(page, ProjectData::from))))
}
