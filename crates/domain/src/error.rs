//! # ドメイン層エラー定義
//!
//! 入力値の検証失敗を表現するエラー型。
//!
//! ページネーションパラメータ自体（`limit`, `orderDir` など）は不正値を
//! デフォルトに正規化するためエラーにならない。ここで扱うのは、呼び出し側が
//! エンティティ固有のルールで検証した結果の失敗のみ。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `UnknownSortField` | 400 Bad Request | `orderBy` がエンティティのソートキーに存在しない |

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 例: 検索キーワードの文字数超過、未知のステータス値
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 未知のソートフィールド
    ///
    /// `allowed` には指定可能なフィールド名を列挙する（エラーメッセージ用）。
    #[error("並び替えに使用できないフィールドです: {field}（指定可能: {}）", allowed.join(", "))]
    UnknownSortField {
        field:   String,
        allowed: Vec<&'static str>,
    },
}
