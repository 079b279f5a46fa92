//! # ユースケース層
//!
//! 一覧取得のページネーションを実装する。
//!
//! ## 処理の流れ
//!
//! ```text
//! クエリ → PaginationRequest → FetchSpec<SortKey> → リポジトリ → format_page → Page
//! ```
//!
//! - リポジトリは `Arc<dyn Trait>` で外部から注入する
//! - エンティティごとの既定ページサイズを使い、設定の上限で `limit` を切り詰める
//! - `orderBy` はエンティティのソートキーに解決し、未知の値は検証エラー

pub(crate) mod helpers;

pub mod course;
pub mod post;
pub mod project;
pub mod question;
pub mod report;

pub use course::CourseUseCaseImpl;
pub use post::PostUseCaseImpl;
pub use project::ProjectUseCaseImpl;
pub use question::QuestionUseCaseImpl;
pub use report::ReportUseCaseImpl;
