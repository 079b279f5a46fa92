//! # ルーター構築
//!
//! リポジトリからユースケースと State を組み立て、全ルートを持つ
//! [`Router`] を返す。`main` と結合テストの両方から使う。
//!
//! ## レイヤー順序（下に書いたものが外側）
//!
//! 1. `TraceLayer`（最外）: リクエストごとのスパンを作成
//! 2. `CanonicalLogLineLayer`: リクエスト完了時に 1 行サマリログを出力（スパン内）

use std::sync::Arc;

use axum::{Json, Router, http::StatusCode, routing::get};
use manabi_infra::repository::{
    CourseRepository,
    PostRepository,
    ProjectRepository,
    QuestionRepository,
    ReportRepository,
};
use manabi_shared::{ErrorResponse, canonical_log::CanonicalLogLineLayer};
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        CourseState,
        PostState,
        ProjectState,
        QuestionState,
        ReadinessState,
        ReportState,
        health_check,
        list_courses,
        list_posts,
        list_projects,
        list_questions,
        list_reports,
        readiness_check,
    },
    openapi::openapi_json,
    usecase::{
        CourseUseCaseImpl,
        PostUseCaseImpl,
        ProjectUseCaseImpl,
        QuestionUseCaseImpl,
        ReportUseCaseImpl,
    },
};

/// 一覧 API が使うリポジトリ一式
#[derive(Clone)]
pub struct Repositories {
    pub courses:   Arc<dyn CourseRepository>,
    pub posts:     Arc<dyn PostRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub reports:   Arc<dyn ReportRepository>,
    pub projects:  Arc<dyn ProjectRepository>,
}

/// アプリケーションのルーターを構築する
///
/// `max_limit` は全一覧 API に共通の `limit` 上限。
pub fn build_app(repos: Repositories, readiness: ReadinessState, max_limit: u32) -> Router {
    let course_state = Arc::new(CourseState {
        usecase: CourseUseCaseImpl::new(repos.courses, max_limit),
    });
    let post_state = Arc::new(PostState {
        usecase: PostUseCaseImpl::new(repos.posts, max_limit),
    });
    let question_state = Arc::new(QuestionState {
        usecase: QuestionUseCaseImpl::new(repos.questions, max_limit),
    });
    let report_state = Arc::new(ReportState {
        usecase: ReportUseCaseImpl::new(repos.reports, max_limit),
    });
    let project_state = Arc::new(ProjectState {
        usecase: ProjectUseCaseImpl::new(repos.projects, max_limit),
    });

    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(Arc::new(readiness)),
        )
        .route("/api/openapi.json", get(openapi_json))
        .merge(
            Router::new()
                .route("/api/v1/courses", get(list_courses))
                .with_state(course_state),
        )
        .merge(
            Router::new()
                .route("/api/v1/posts", get(list_posts))
                .with_state(post_state),
        )
        .merge(
            Router::new()
                .route("/api/v1/questions", get(list_questions))
                .with_state(question_state),
        )
        .merge(
            Router::new()
                .route("/api/v1/reports", get(list_reports))
                .with_state(report_state),
        )
        .merge(
            Router::new()
                .route("/api/v1/projects", get(list_projects))
                .with_state(project_state),
        )
        .fallback(not_found)
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http())
}

/// 未定義のパスは Problem Details 形式の 404 を返す
async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::not_found("指定されたパスは存在しません")),
    )
}
