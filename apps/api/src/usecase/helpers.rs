//! ユースケース層の共通ヘルパー
//!
//! 各一覧ユースケースで同じになる「要求の正規化 → 取得仕様の構築」と
//! 「取得結果のページ整形」を共通化する。

use std::collections::HashMap;

use manabi_domain::pagination::{
    Cursored,
    DEFAULT_CURSOR_FIELD,
    FetchSpec,
    Page,
    PaginationRequest,
    SortKey,
    build_fetch_spec,
    format_page,
};

use crate::error::ApiError;

/// クエリパラメータからエンティティの取得仕様を組み立てる
///
/// `limit` は `default_limit` を既定値とし、`max_limit` で切り詰める。
/// カーソルは行 ID（`id`）。
pub(crate) fn prepare_fetch<K: SortKey>(
    query: &HashMap<String, String>,
    default_limit: u32,
    max_limit: u32,
) -> Result<FetchSpec<K>, ApiError> {
    let request = PaginationRequest::from_query(query, default_limit).with_max_limit(max_limit);
    let spec = build_fetch_spec(&request, DEFAULT_CURSOR_FIELD).resolve_order::<K>()?;
    Ok(spec)
}

/// 取得結果を `spec` のページサイズで整形する
pub(crate) fn into_page<T: Cursored, K>(rows: Vec<T>, spec: &FetchSpec<K>) -> Page<T> {
    format_page(rows, spec.limit(), DEFAULT_CURSOR_FIELD)
}
