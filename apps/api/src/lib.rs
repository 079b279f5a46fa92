//! # Manabi API ライブラリ
//!
//! 学習プラットフォームの一覧 API（コース・投稿・質問・レポート・
//! プロジェクト）を提供する。バイナリ（`main.rs`）と結合テストから使う。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod openapi;
pub mod usecase;

// テストユーティリティ（内部実装、ドキュメントからは隠す）
#[doc(hidden)]
pub mod test_utils;
