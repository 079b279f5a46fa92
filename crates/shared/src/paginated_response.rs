//! # ページネーション付きレスポンス
//!
//! カーソルベースのページネーションに対応した一覧 API のレスポンス型。
//!
//! ## JSON 形式
//!
//! ```json
//! {
//!   "data": [...],
//!   "pagination": {
//!     "nextCursor": "0190a1b2-...",
//!     "hasMore": true,
//!     "count": 20
//!   }
//! }
//! ```
//!
//! `nextCursor` が `null` の場合は最後のページを意味する。

use serde::{Deserialize, Serialize};

/// ページネーションのメタデータ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaginationMeta {
    /// 次ページ取得用のカーソル（最終ページでは `null`）
    pub next_cursor: Option<String>,
    /// 後続ページが存在するか
    pub has_more:    bool,
    /// このページに含まれる件数
    pub count:       usize,
}

/// ページネーション付きレスポンス
///
/// リスト + カーソルメタデータの形式。
///
/// ## 使用例
///
/// ```
/// use manabi_shared::PaginatedResponse;
///
/// let response = PaginatedResponse::new(vec!["a", "b"], Some("b".to_string()), true);
/// assert_eq!(response.pagination.count, 2);
/// assert!(response.pagination.has_more);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaginatedResponse<T> {
    pub data:       Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    /// データとカーソル情報からレスポンスを組み立てる
    ///
    /// `count` は `data` の件数から算出するため、呼び出し側で渡す必要はない。
    pub fn new(data: Vec<T>, next_cursor: Option<String>, has_more: bool) -> Self {
        let count = data.len();
        Self {
            data,
            pagination: PaginationMeta {
                next_cursor,
                has_more,
                count,
            },
        }
    }
}
