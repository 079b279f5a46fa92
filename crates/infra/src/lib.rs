//! # Manabi インフラ層
//!
//! PostgreSQL をデータソースとする一覧取得の実装。
//!
//! ## 責務
//!
//! - **データベース接続**: 接続プール管理、マイグレーション、疎通確認
//! - **リポジトリ実装**: [`FetchSpec`](manabi_domain::pagination::FetchSpec) を
//!   シーク方式の SQL に変換して行を取得する
//! - **テスト用実装**: `test-utils` feature でインメモリリポジトリを公開する
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use manabi_infra::{db, repository::PostgresCourseRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/manabi", 10).await?;
//!     let courses = PostgresCourseRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
