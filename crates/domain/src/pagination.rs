//! # カーソルページネーション
//!
//! 一覧 API で共通のカーソルベースページネーション。
//!
//! 1 回の一覧取得は次の 3 ステップで構成される:
//!
//! 1. [`PaginationRequest::from_query`]: クエリパラメータを正規化する（失敗しない）
//! 2. [`build_fetch_spec`]: データソースへの取得仕様を組み立てる
//! 3. [`format_page`]: 取得結果（最大 `limit + 1` 行）をページに整形する
//!
//! 取得は常に 1 行多く要求し（先読み行）、その有無で次ページの存在を判定する。
//! 追加の COUNT クエリは発行しない。
//!
//! ## 前方走査の前提
//!
//! 前ページの `next_cursor` を次の `cursor` に渡し続けることで全件を走査できる。
//! 重複・欠落なく走査できるのは、並び順のフィールドが一意なタイブレーク
//! （`id`）と組み合わされ、走査済み位置への挿入・削除が起きない場合に限る。
//! スナップショット分離はしない楽観的な走査であり、カーソル行が途中で
//! 削除された場合の扱いはデータソースに委ねる。
//!
//! 本モジュールの関数はすべて純粋関数で、I/O も共有状態も持たない。

use std::collections::HashMap;

use serde::Serialize;

use crate::DomainError;

/// `limit` 未指定時のデフォルト
///
/// エンティティごとの既定値がある場合はそちらを使う。
pub const DEFAULT_LIMIT: u32 = 20;

/// `orderBy` 未指定時のデフォルト
pub const DEFAULT_ORDER_BY: &str = "createdAt";

/// カーソルとして使うフィールドのデフォルト
pub const DEFAULT_CURSOR_FIELD: &str = "id";

/// 認識するクエリパラメータ名
pub mod param {
    pub const CURSOR: &str = "cursor";
    pub const LIMIT: &str = "limit";
    pub const ORDER_BY: &str = "orderBy";
    pub const ORDER_DIR: &str = "orderDir";
}

/// 並び順の方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// クエリパラメータ値から方向を決める
    ///
    /// 厳密に `"asc"` のときだけ昇順。`"ASC"` や `"ascending"`、空文字列、
    /// 未指定を含むそれ以外はすべて降順になる。
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// SQL の `ORDER BY` に埋め込むキーワード
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 正規化済みのページネーション要求
///
/// # 不変条件
///
/// - `limit` は 1 以上
/// - `order_dir` は `Asc` / `Desc` のいずれか
///
/// 上限値の強制はしない。上限が必要な呼び出し側は
/// [`with_max_limit`](Self::with_max_limit) で適用する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationRequest {
    /// 前ページ最後の要素の識別子。先頭ページでは `None`
    pub cursor:    Option<String>,
    pub limit:     u32,
    pub order_by:  String,
    pub order_dir: SortDirection,
}

impl PaginationRequest {
    /// クエリパラメータから要求を組み立てる
    ///
    /// 失敗しない。不正な値はすべてデフォルトに正規化する。
    /// `cursor` / `limit` / `orderBy` / `orderDir` 以外のキーは無視する。
    ///
    /// `default_limit` が 0 の場合は 1 として扱う。
    pub fn from_query(query: &HashMap<String, String>, default_limit: u32) -> Self {
        let get = |key: &str| query.get(key).map(String::as_str);

        Self {
            cursor:    get(param::CURSOR).map(str::to_string),
            limit:     parse_limit(get(param::LIMIT), default_limit.max(1)),
            order_by:  get(param::ORDER_BY)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_ORDER_BY)
                .to_string(),
            order_dir: SortDirection::parse_lenient(get(param::ORDER_DIR)),
        }
    }

    /// `limit` を上限で切り詰める
    pub fn with_max_limit(mut self, max_limit: u32) -> Self {
        self.limit = self.limit.min(max_limit.max(1));
        self
    }

    /// 有効なカーソル（空文字列を除く）
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// `limit` を 10 進整数として読む
///
/// 先頭の空白、符号、先頭から続く数字だけを解釈する（`"12abc"` は 12、
/// `"3.9"` は 3）。数字がない、0 以下、`u32` を超える場合はデフォルト。
fn parse_limit(raw: Option<&str>, default: u32) -> u32 {
    let Some(raw) = raw else {
        return default;
    };

    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];

    if negative || digits.is_empty() {
        return default;
    }

    match digits.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => default,
    }
}

/// カーソルの起点行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorAnchor {
    /// 起点行を特定するフィールド名（通常は `"id"`）
    pub field: String,
    pub value: String,
}

/// 単一フィールドの並び順
///
/// `F` はリクエスト由来のフィールド名（`String`）か、
/// 呼び出し側で検証済みのソートキー列挙型。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy<F> {
    pub field:     F,
    pub direction: SortDirection,
}

/// データソースへの取得仕様
///
/// データソースは「起点行にシークし、宣言順で `skip + take` 行を走査する」
/// セマンティクスを満たす必要がある。並び順のフィールドが一意でない場合は
/// 一意キーでタイブレークしなければならない（データソース側の責務）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSpec<F = String> {
    /// `limit + 1`（先読み行を含む）
    pub take:   u32,
    /// カーソル指定時は 1（起点行自体を除外する）、それ以外は 0
    pub skip:   u32,
    pub cursor: Option<CursorAnchor>,
    pub order:  OrderBy<F>,
}

impl<F> FetchSpec<F> {
    /// 先読み行を除いたページサイズ
    pub fn limit(&self) -> u32 {
        self.take.saturating_sub(1)
    }
}

impl FetchSpec<String> {
    /// 並び順のフィールド名をエンティティのソートキーに解決する
    ///
    /// 未知のフィールド名は [`DomainError::UnknownSortField`]。
    pub fn resolve_order<K: SortKey>(self) -> Result<FetchSpec<K>, DomainError> {
        let field =
            K::from_field_name(&self.order.field).ok_or_else(|| DomainError::UnknownSortField {
                field:   self.order.field.clone(),
                allowed: K::allowed_field_names(),
            })?;

        Ok(FetchSpec {
            take:   self.take,
            skip:   self.skip,
            cursor: self.cursor,
            order:  OrderBy {
                field,
                direction: self.order.direction,
            },
        })
    }
}

/// 要求から取得仕様を組み立てる
///
/// 純粋関数。`cursor_field` が対象コレクションに存在し比較可能であることは
/// 呼び出し側が保証する。
pub fn build_fetch_spec(request: &PaginationRequest, cursor_field: &str) -> FetchSpec {
    let cursor = request.cursor().map(|value| CursorAnchor {
        field: cursor_field.to_string(),
        value: value.to_string(),
    });

    FetchSpec {
        take: request.limit.saturating_add(1),
        skip: u32::from(cursor.is_some()),
        cursor,
        order: OrderBy {
            field:     request.order_by.clone(),
            direction: request.order_dir,
        },
    }
}

/// エンティティごとの並び替え可能フィールド
///
/// `define_sort_key!` マクロで実装する。
pub trait SortKey: Sized + Copy + 'static {
    /// 全バリアント（先頭がデフォルト）
    const ALL: &'static [Self];

    /// クエリパラメータ `orderBy` で指定するフィールド名
    fn field_name(&self) -> &'static str;

    /// フィールド名から解決する（大文字小文字を区別する）
    fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.field_name() == name)
    }

    fn allowed_field_names() -> Vec<&'static str> {
        Self::ALL.iter().map(SortKey::field_name).collect()
    }
}

/// カーソル値を取り出せる要素
pub trait Cursored {
    /// `field` の値を文字列で返す。対応しないフィールドは `None`
    fn cursor_value(&self, field: &str) -> Option<String>;
}

/// 整形済みのページ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// 長さは `limit` 以下
    pub data:        Vec<T>,
    /// `has_more` かつ `data` が空でないときだけ `Some`
    pub next_cursor: Option<String>,
    pub has_more:    bool,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            data:        Vec::new(),
            next_cursor: None,
            has_more:    false,
        }
    }

    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// ページ情報を保ったまま要素を変換する
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data:        self.data.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            has_more:    self.has_more,
        }
    }
}

/// 取得結果をページに整形する
///
/// `rows` は [`build_fetch_spec`] の `take = limit + 1` で取得した結果。
///
/// - `has_more`: `rows.len() > limit`
/// - `data`: 先読み行を除いた先頭 `limit` 件
/// - `next_cursor`: `has_more` のときだけ `data` 最後の要素のカーソル値
///
/// `rows.len() == limit`（ソースが尽きた）の場合、ページが埋まっていても
/// `has_more` は `false` になる。
pub fn format_page<T: Cursored>(mut rows: Vec<T>, limit: u32, cursor_field: &str) -> Page<T> {
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let has_more = rows.len() > limit;
    if has_more {
        rows.truncate(limit);
    }

    let next_cursor = if has_more {
        rows.last().and_then(|item| item.cursor_value(cursor_field))
    } else {
        None
    };

    Page {
        data: rows,
        next_cursor,
        has_more,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        id:    String,
        title: String,
    }

    impl Row {
        fn new(id: &str) -> Self {
            Self {
                id:    id.to_string(),
                title: format!("title-{id}"),
            }
        }
    }

    impl Cursored for Row {
        fn cursor_value(&self, field: &str) -> Option<String> {
            match field {
                "id" => Some(self.id.clone()),
                "title" => Some(self.title.clone()),
                _ => None,
            }
        }
    }

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn rows(n: usize) -> Vec<Row> {
        (1..=n).map(|i| Row::new(&format!("r{i}"))).collect()
    }

    // from_query

    #[test]
    fn test_認識するキーがない場合は全てデフォルトになる() {
        let request = PaginationRequest::from_query(&query(&[("page", "3")]), DEFAULT_LIMIT);

        assert_eq!(
            request,
            PaginationRequest {
                cursor:    None,
                limit:     20,
                order_by:  "createdAt".to_string(),
                order_dir: SortDirection::Desc,
            }
        );
    }

    #[test]
    fn test_呼び出し側のデフォルトlimitが使われる() {
        let request = PaginationRequest::from_query(&HashMap::new(), 50);

        assert_eq!(request.limit, 50);
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("   ")]
    #[case("-5")]
    #[case("0")]
    #[case("-0")]
    #[case("NaN")]
    #[case("0x10")]
    #[case("99999999999")]
    fn test_数値でないか正でないlimitはデフォルトになる(#[case] raw: &str) {
        let request = PaginationRequest::from_query(&query(&[("limit", raw)]), 20);

        assert_eq!(request.limit, 20);
    }

    #[rstest]
    #[case("2", 2)]
    #[case("  7", 7)]
    #[case("+3", 3)]
    #[case("12abc", 12)]
    #[case("3.9", 3)]
    #[case("1e3", 1)]
    #[case("500", 500)]
    fn test_limitは先頭の10進数字を解釈する(#[case] raw: &str, #[case] expected: u32) {
        let request = PaginationRequest::from_query(&query(&[("limit", raw)]), 20);

        assert_eq!(request.limit, expected);
    }

    #[test]
    fn test_デフォルトlimitが0でもlimitは1以上になる() {
        let request = PaginationRequest::from_query(&HashMap::new(), 0);

        assert_eq!(request.limit, 1);
    }

    #[rstest]
    #[case(Some("asc"), SortDirection::Asc)]
    #[case(Some("desc"), SortDirection::Desc)]
    #[case(Some("ASC"), SortDirection::Desc)]
    #[case(Some("ascending"), SortDirection::Desc)]
    #[case(Some(" asc"), SortDirection::Desc)]
    #[case(Some(""), SortDirection::Desc)]
    #[case(None, SortDirection::Desc)]
    fn test_order_dirは厳密にascのときだけ昇順になる(
        #[case] raw: Option<&str>,
        #[case] expected: SortDirection,
    ) {
        let q = raw.map_or_else(HashMap::new, |v| query(&[("orderDir", v)]));

        let request = PaginationRequest::from_query(&q, 20);

        assert_eq!(request.order_dir, expected);
    }

    #[test]
    fn test_cursorとorder_byはそのまま引き継がれる() {
        let request = PaginationRequest::from_query(
            &query(&[("cursor", "abc-123"), ("orderBy", "title")]),
            20,
        );

        assert_eq!(request.cursor.as_deref(), Some("abc-123"));
        assert_eq!(request.order_by, "title");
    }

    #[test]
    fn test_空のorder_byはcreated_atになる() {
        let request = PaginationRequest::from_query(&query(&[("orderBy", "")]), 20);

        assert_eq!(request.order_by, "createdAt");
    }

    #[test]
    fn test_with_max_limitは上限で切り詰める() {
        let request = PaginationRequest::from_query(&query(&[("limit", "500")]), 20);

        assert_eq!(request.clone().with_max_limit(100).limit, 100);
        assert_eq!(request.with_max_limit(1000).limit, 500);
    }

    // build_fetch_spec

    #[test]
    fn test_カーソルなしではskipが0で起点がない() {
        let request = PaginationRequest::from_query(&query(&[("limit", "2")]), 20);

        let spec = build_fetch_spec(&request, DEFAULT_CURSOR_FIELD);

        assert_eq!(
            spec,
            FetchSpec {
                take:   3,
                skip:   0,
                cursor: None,
                order:  OrderBy {
                    field:     "createdAt".to_string(),
                    direction: SortDirection::Desc,
                },
            }
        );
    }

    #[test]
    fn test_カーソルありではskipが1で起点を持つ() {
        let request = PaginationRequest::from_query(
            &query(&[("cursor", "r2"), ("limit", "5"), ("orderDir", "asc")]),
            20,
        );

        let spec = build_fetch_spec(&request, DEFAULT_CURSOR_FIELD);

        assert_eq!(spec.take, 6);
        assert_eq!(spec.skip, 1);
        assert_eq!(
            spec.cursor,
            Some(CursorAnchor {
                field: "id".to_string(),
                value: "r2".to_string(),
            })
        );
        assert_eq!(spec.order.direction, SortDirection::Asc);
        assert_eq!(spec.limit(), 5);
    }

    #[test]
    fn test_空のカーソルは未指定として扱う() {
        let request = PaginationRequest::from_query(&query(&[("cursor", "")]), 20);

        let spec = build_fetch_spec(&request, DEFAULT_CURSOR_FIELD);

        assert_eq!(spec.skip, 0);
        assert_eq!(spec.cursor, None);
    }

    #[test]
    fn test_takeはオーバーフローしない() {
        let request = PaginationRequest {
            cursor:    None,
            limit:     u32::MAX,
            order_by:  DEFAULT_ORDER_BY.to_string(),
            order_dir: SortDirection::Desc,
        };

        assert_eq!(build_fetch_spec(&request, "id").take, u32::MAX);
    }

    #[test]
    fn test_build_fetch_specは同じ入力に同じ結果を返す() {
        let request = PaginationRequest::from_query(&query(&[("cursor", "x")]), 20);

        assert_eq!(
            build_fetch_spec(&request, "id"),
            build_fetch_spec(&request, "id")
        );
    }

    // resolve_order

    define_sort_key! {
        enum TestSortKey {
            CreatedAt => "createdAt",
            Title => "title",
        }
    }

    #[test]
    fn test_resolve_orderは既知のフィールドを列挙型に解決する() {
        let request = PaginationRequest::from_query(&query(&[("orderBy", "title")]), 20);

        let spec = build_fetch_spec(&request, "id")
            .resolve_order::<TestSortKey>()
            .unwrap();

        assert_eq!(spec.order.field, TestSortKey::Title);
        assert_eq!(spec.take, 21);
    }

    #[test]
    fn test_resolve_orderは未知のフィールドを拒否する() {
        let request = PaginationRequest::from_query(&query(&[("orderBy", "password")]), 20);

        let result = build_fetch_spec(&request, "id").resolve_order::<TestSortKey>();

        assert_eq!(
            result,
            Err(DomainError::UnknownSortField {
                field:   "password".to_string(),
                allowed: vec!["createdAt", "title"],
            })
        );
    }

    // format_page

    #[test]
    fn test_先読み行があればhas_moreがtrueで最後の要素がnext_cursorになる() {
        let page = format_page(rows(3), 2, DEFAULT_CURSOR_FIELD);

        assert_eq!(page.data, rows(2));
        assert!(page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("r2"));
        assert_eq!(page.count(), 2);
    }

    #[test]
    fn test_ちょうどlimit件なら終端ページになる() {
        let page = format_page(rows(2), 2, DEFAULT_CURSOR_FIELD);

        assert_eq!(page.count(), 2);
        assert!(!page.has_more);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn test_空の結果は空の終端ページになる() {
        let page = format_page(Vec::<Row>::new(), 2, DEFAULT_CURSOR_FIELD);

        assert_eq!(page, Page::empty());
        assert_eq!(page.count(), 0);
    }

    #[test]
    fn test_next_cursorは指定フィールドの値になる() {
        let page = format_page(rows(3), 1, "title");

        assert_eq!(page.next_cursor.as_deref(), Some("title-r1"));
    }

    #[test]
    fn test_format_pageは同じ入力に同じ結果を返す() {
        let input = rows(5);

        let first = format_page(input.clone(), 3, DEFAULT_CURSOR_FIELD);
        let second = format_page(input, 3, DEFAULT_CURSOR_FIELD);

        assert_eq!(first, second);
    }

    #[test]
    fn test_mapはページ情報を保つ() {
        let page = format_page(rows(3), 2, DEFAULT_CURSOR_FIELD).map(|row| row.id);

        assert_eq!(page.data, vec!["r1".to_string(), "r2".to_string()]);
        assert_eq!(page.next_cursor.as_deref(), Some("r2"));
        assert!(page.has_more);
    }

    #[test]
    fn test_limit2の一連の流れ() {
        // Given
        let q = query(&[("limit", "2")]);

        // When
        let request = PaginationRequest::from_query(&q, DEFAULT_LIMIT);
        let spec = build_fetch_spec(&request, DEFAULT_CURSOR_FIELD);
        let page = format_page(rows(3), request.limit, DEFAULT_CURSOR_FIELD);

        // Then
        assert_eq!(request.limit, 2);
        assert_eq!(request.order_by, "createdAt");
        assert_eq!(request.order_dir, SortDirection::Desc);
        assert_eq!(request.cursor, None);
        assert_eq!((spec.take, spec.skip, spec.cursor), (3, 0, None));
        assert_eq!(spec.order.field, "createdAt");
        assert_eq!(page.count(), 2);
        assert!(page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("r2"));
    }

    // 前方走査

    /// 「起点行にシークし skip 行飛ばして take 行返す」データソース
    fn fetch(source: &[Row], spec: &FetchSpec) -> Vec<Row> {
        let start = match &spec.cursor {
            Some(anchor) => source
                .iter()
                .position(|row| row.cursor_value(&anchor.field).as_deref() == Some(&anchor.value))
                .expect("カーソル行が存在すること"),
            None => 0,
        };

        source
            .iter()
            .skip(start + spec.skip as usize)
            .take(spec.take as usize)
            .cloned()
            .collect()
    }

    #[rstest]
    #[case(0, 3)]
    #[case(1, 1)]
    #[case(5, 2)]
    #[case(6, 2)]
    #[case(7, 3)]
    #[case(10, 10)]
    #[case(10, 11)]
    fn test_next_cursorを辿ると全件を重複なく順に走査できる(
        #[case] n: usize,
        #[case] k: u32,
    ) {
        let source = rows(n);
        let mut visited = Vec::new();
        let mut pages = 0;
        let mut cursor: Option<String> = None;

        loop {
            let mut q = query(&[("limit", &k.to_string())]);
            if let Some(c) = &cursor {
                q.insert("cursor".to_string(), c.clone());
            }

            let request = PaginationRequest::from_query(&q, DEFAULT_LIMIT);
            let spec = build_fetch_spec(&request, DEFAULT_CURSOR_FIELD);
            let page = format_page(fetch(&source, &spec), request.limit, DEFAULT_CURSOR_FIELD);

            pages += 1;
            visited.extend(page.data);

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        assert_eq!(visited, source);
        assert_eq!(pages, n.div_ceil(k as usize).max(1));
    }
}
