//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置し、この `handler.rs` で re-export する
//! - ページネーションのパラメータは `Query<HashMap<String, String>>` のまま
//!   ユースケースに渡す（`limit` の寛容なパースをドメイン層で行うため）
//! - フィルタは型付きのクエリ構造体で受け取り、ドメインの値に変換する。
//!   構造体への変換失敗（重複キーなど）も `validation-error` で返す
//! - ハンドラは薄く保ち、ページングはユースケースに委譲する

pub mod course;
pub mod health;
pub mod post;
pub mod project;
pub mod question;
pub mod report;

pub use course::{CourseState, list_courses};
pub use health::{ReadinessState, health_check, readiness_check};
use manabi_domain::pagination::Page;
use manabi_shared::PaginatedResponse;
pub use post::{PostState, list_posts};
pub use project::{ProjectState, list_projects};
pub use question::{QuestionState, list_questions};
pub use report::{ReportState, list_reports};
use serde::Deserialize;
use utoipa::IntoParams;

/// 一覧 API 共通のページネーションパラメータ（OpenAPI ドキュメント用）
///
/// 実際のパースは [`PaginationRequest::from_query`](manabi_domain::pagination::PaginationRequest::from_query)
/// が行い、不正な値は既定値に正規化される。
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// 前ページの `nextCursor`（先頭ページでは省略）
    pub cursor:    Option<String>,
    /// 取得件数。不正な値は既定値、上限を超える値は上限に切り詰める
    #[param(value_type = Option<u32>)]
    pub limit:     Option<String>,
    /// 並び替えフィールド（既定: `createdAt`）
    pub order_by:  Option<String>,
    /// `asc` のみ昇順。それ以外は降順
    pub order_dir: Option<String>,
}

/// ページを API レスポンスに変換する
pub(crate) fn paginated<T, U>(page: Page<T>, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
    let page = page.map(f);
    PaginatedResponse::new(page.data, page.next_cursor, page.has_more)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ページ情報を保ったまま変換する() {
        let page = Page {
            data:        vec![1, 2],
            next_cursor: Some("2".to_string()),
            has_more:    true,
        };

        let response = paginated(page, |n| n * 10);

        assert_eq!(response.data, vec![10, 20]);
        assert_eq!(response.pagination.next_cursor, Some("2".to_string()));
        assert!(response.pagination.has_more);
        assert_eq!(response.pagination.count, 2);
    }
}
