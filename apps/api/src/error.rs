//! # API エラー定義
//!
//! ユースケースで発生するエラーと、HTTP レスポンス（RFC 9457 Problem Details）
//! への変換を定義する。
//!
//! | エラー | HTTP ステータス | `type` |
//! |--------|----------------|--------|
//! | [`DomainError`] | 400 | `validation-error` |
//! | クエリ文字列の変換失敗（重複キーなど） | 400 | `validation-error` |
//! | カーソルの形式不正・カーソル行の消失 | 400 | `invalid-cursor` |
//! | その他のインフラ層エラー | 500 | `internal-error` |

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use manabi_domain::DomainError;
use manabi_infra::{InfraError, InfraErrorKind};
use manabi_shared::ErrorResponse;
use thiserror::Error;

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リクエストパラメータの検証失敗
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// フィルタのクエリ文字列を型付き構造体に変換できない
    #[error("クエリパラメータが不正です: {}", .0.body_text())]
    InvalidQuery(#[from] QueryRejection),

    /// データソースのエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl ApiError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            Self::Domain(e) => ErrorResponse::validation_error(e.to_string()),
            Self::InvalidQuery(_) => ErrorResponse::validation_error(self.to_string()),
            Self::Database(e) => match e.kind() {
                InfraErrorKind::InvalidInput(msg) => ErrorResponse::invalid_cursor(msg.clone()),
                InfraErrorKind::CursorNotFound { entity, cursor } => {
                    tracing::warn!(
                        entity = %entity,
                        cursor = %cursor,
                        "カーソルが指す行が存在しません"
                    );
                    ErrorResponse::invalid_cursor(
                        "カーソルが指す項目が見つかりません。先頭ページから取得し直してください",
                    )
                }
                InfraErrorKind::Database(_) | InfraErrorKind::Unexpected(_) => {
                    tracing::error!(
                        error = %e,
                        span_trace = %e.span_trace(),
                        "一覧の取得に失敗しました"
                    );
                    ErrorResponse::internal_error()
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = self.to_error_response();
        let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn into_parts(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ドメインエラーはvalidation_errorになる() {
        let err = ApiError::from(DomainError::Validation("不正".to_string()));

        let (status, body) = into_parts(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.error_type,
            "https://manabi.example.com/errors/validation-error"
        );
        assert_eq!(body.detail, "バリデーションエラー: 不正");
    }

    #[tokio::test]
    async fn test_フィルタのクエリ変換失敗はvalidation_errorになる() {
        use axum::{extract::Query, http::Uri};

        use crate::handler::course::ListCoursesQuery;

        let uri: Uri = "/api/v1/courses?search=a&search=b".parse().unwrap();
        let rejection = Query::<ListCoursesQuery>::try_from_uri(&uri).unwrap_err();

        let (status, body) = into_parts(ApiError::from(rejection)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.error_type,
            "https://manabi.example.com/errors/validation-error"
        );
        assert!(body.detail.starts_with("クエリパラメータが不正です: "));
        assert!(body.detail.contains("search"));
    }

    #[tokio::test]
    async fn test_形式不正のカーソルはinvalid_cursorになる() {
        let err = ApiError::from(InfraError::invalid_input("カーソルの形式が不正です: abc"));

        let (status, body) = into_parts(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error_type, "https://manabi.example.com/errors/invalid-cursor");
        assert_eq!(body.detail, "カーソルの形式が不正です: abc");
    }

    #[tokio::test]
    async fn test_消失したカーソルはinvalid_cursorになる() {
        let err = ApiError::from(InfraError::cursor_not_found("courses", "0190"));

        let (status, body) = into_parts(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error_type, "https://manabi.example.com/errors/invalid-cursor");
    }

    #[tokio::test]
    async fn test_データベースエラーは詳細を隠して500になる() {
        let err = ApiError::from(InfraError::from(sqlx::Error::PoolTimedOut));

        let (status, body) = into_parts(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, ErrorResponse::internal_error());
    }
}
