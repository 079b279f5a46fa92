//! # Manabi ドメイン層
//!
//! 学習コミュニティの一覧系 API が共有するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **カーソルページネーション**: [`pagination`] はどのエンティティにも依存しない
//!   純粋関数の集まりで、I/O を一切行わない
//! - **読み取りモデル**: コース・投稿・質問・レポート・プロジェクトは一覧表示に
//!   必要なフィールドのみを持つ
//! - **型付きソートキー**: `orderBy` の文字列はエンティティごとの列挙型に解決してから
//!   データソースへ渡す
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`pagination`] - カーソルページネーション（リクエスト解析・取得仕様・ページ整形）
//! - [`course`] / [`post`] / [`question`] / [`report`] / [`project`] - 読み取りモデル
//! - [`value_objects`] - エンティティ横断の値オブジェクト
//! - [`error`] - ドメインエラー
//!
//! ## 使用例
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use manabi_domain::pagination::{PaginationRequest, SortDirection, build_fetch_spec};
//!
//! let query = HashMap::from([("limit".to_string(), "2".to_string())]);
//! let request = PaginationRequest::from_query(&query, 20);
//! let spec = build_fetch_spec(&request, "id");
//!
//! assert_eq!(spec.take, 3);
//! assert_eq!(spec.skip, 0);
//! assert_eq!(spec.order.direction, SortDirection::Desc);
//! ```

#[macro_use]
mod macros;

pub mod course;
pub mod error;
pub mod pagination;
pub mod post;
pub mod project;
pub mod question;
pub mod report;
pub mod value_objects;

pub use error::DomainError;
