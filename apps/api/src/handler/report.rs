//! # レポート一覧ハンドラ
//!
//! `GET /api/v1/reports`

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use manabi_domain::{
    DomainError,
    report::Report,
    value_objects::{SearchKeyword, parse_enum_param},
};
use manabi_infra::repository::ReportFilter;
use manabi_shared::{ErrorResponse, PaginatedResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{PaginationParams, paginated};
use crate::{error::ApiError, usecase::ReportUseCaseImpl};

pub struct ReportState {
    pub usecase: ReportUseCaseImpl,
}

/// レポート一覧のフィルタ
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListReportsQuery {
    /// `DRAFT` / `PUBLISHED`
    pub status: Option<String>,
    /// タイトルの部分一致
    pub search: Option<String>,
}

impl ListReportsQuery {
    fn into_filter(self) -> Result<ReportFilter, DomainError> {
        Ok(ReportFilter {
            status: parse_enum_param("ステータス", self.status.as_deref())?,
            search: SearchKeyword::parse_optional(self.search.as_deref())?,
        })
    }
}

/// レポート一覧の要素データ
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub id:         String,
    pub title:      String,
    pub summary:    Option<String>,
    pub status:     String,
    pub author_id:  String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Report> for ReportData {
    fn from(report: Report) -> Self {
        Self {
            id:         report.id.to_string(),
            title:      report.title,
            summary:    report.summary,
            status:     report.status.to_string(),
            author_id:  report.author_id.to_string(),
            created_at: report.created_at.to_rfc3339(),
            updated_at: report.updated_at.to_rfc3339(),
        }
    }
}

/// GET /api/v1/reports
///
/// レポート一覧を取得する（既定: 新しい順に 20 件）。
#[utoipa::path(
    get,
    path = "/api/v1/reports",
    tag = "reports",
    params(PaginationParams, ListReportsQuery),
    responses(
        (status = 200, description = "レポート一覧", body = PaginatedResponse<ReportData>),
        (status = 400, description = "不正なソートフィールド・フィルタ・カーソル", body = ErrorResponse),
        (status = 500, description = "内部エラー", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_reports(
    State(state): State<Arc<ReportState>>,
    Query(params): Query<HashMap<String, String>>,
    query: Result<Query<ListReportsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let page = state.usecase.list_reports(&params, &filter).await?;

    Ok((StatusCode::OK, Json(paginated(page, ReportData::from))))
}

#[cfg(test)]
mod tests {
    use manabi_domain::report::ReportStatus;

    use super::*;

    #[test]
    fn test_ステータスと検索キーワードを解釈する() {
        let query = ListReportsQuery {
            status: Some("PUBLISHED".to_string()),
            search: Some("  週報 ".to_string()),
        };

        let filter = query.into_filter().unwrap();

        assert_eq!(filter.status, Some(ReportStatus::Published));
        assert_eq!(filter.search.map(|k| k.as_str().to_string()), Some("週報".to_string()));
    }

    #[test]
    fn test_未知のステータスは検証エラー() {
        let query = ListReportsQuery {
            status: Some("ARCHIVED".to_string()),
            search: None,
        };

        assert!(query.into_filter().is_err());
    }
}
