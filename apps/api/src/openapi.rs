//! # OpenAPI 仕様定義
//!
//! utoipa を使用して API の OpenAPI 仕様を Rust の型から生成する。
//! `ApiDoc::openapi()` で取得でき、`GET /api/openapi.json` でも配信する。

use axum::Json;
use utoipa::OpenApi;

use crate::handler::{course, health, post, project, question, report};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Manabi API",
        version = "0.1.0",
        description = "学習プラットフォーム Manabi の一覧 API（カーソルベースページネーション）"
    ),
    paths(
        // health
        health::health_check,
        health::readiness_check,
        // catalog
        course::list_courses,
        post::list_posts,
        question::list_questions,
        report::list_reports,
        project::list_projects,
    ),
    components(schemas(manabi_shared::ErrorResponse, manabi_shared::PaginationMeta)),
    tags(
        (name = "health", description = "ヘルスチェック"),
        (name = "courses", description = "コース"),
        (name = "posts", description = "投稿"),
        (name = "questions", description = "Q&A 質問"),
        (name = "reports", description = "レポート"),
        (name = "projects", description = "プロジェクト"),
    )
)]
pub struct ApiDoc;

/// GET /api/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
