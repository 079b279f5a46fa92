//! # リポジトリ実装
//!
//! 一覧取得用の読み取りリポジトリ。
//!
//! 各リポジトリは [`FetchSpec`](manabi_domain::pagination::FetchSpec) を受け取り、
//! 先読み行を含む最大 `take` 行をそのまま返す。ページへの整形
//! （先読み行の除去・`next_cursor` の算出）は呼び出し側が行う。

pub mod course_repository;
pub mod post_repository;
pub mod project_repository;
pub mod question_repository;
pub mod report_repository;
pub(crate) mod seek;

use std::str::FromStr;

pub use course_repository::{CourseFilter, CourseRepository, PostgresCourseRepository};
pub use post_repository::{PostFilter, PostRepository, PostgresPostRepository};
pub use project_repository::{PostgresProjectRepository, ProjectFilter, ProjectRepository};
pub use question_repository::{PostgresQuestionRepository, QuestionFilter, QuestionRepository};
pub use report_repository::{PostgresReportRepository, ReportFilter, ReportRepository};

use crate::error::InfraError;

/// DB に TEXT で保存された列挙値を解釈する
fn parse_db_enum<T: FromStr>(column: &str, value: &str) -> Result<T, InfraError> {
    value
        .parse()
        .map_err(|_| InfraError::unexpected(format!("{column} の値が不正です: {value}")))
}
