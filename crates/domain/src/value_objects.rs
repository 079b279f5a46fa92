//! # 共通値オブジェクト
//!
//! 複数のエンティティで共有される値オブジェクトを定義する。
//!
//! ## 含まれる型
//!
//! | 型 | ラップ対象 | 用途 |
//! |---|-----------|------|
//! | [`UserId`] | `Uuid` | 作成者・オーナーの ID |
//! | [`SkillLevel`] | enum | コース・プロジェクトの対象レベル |
//! | [`SearchKeyword`] | `String` | タイトル等の部分一致検索キーワード |
//! | [`TagList`] | `Vec<String>` | カンマ区切りタグフィルタ |

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::DomainError;

define_uuid_id! {
    /// ユーザー ID
    ///
    /// 一覧 API では作成者・オーナーの参照としてのみ使う。
    pub struct UserId;
}

impl UserId {
    /// クエリパラメータの ID をパースする（空指定は絞り込みなし）
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, DomainError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => uuid::Uuid::parse_str(value)
                .map(|uuid| Some(Self::from_uuid(uuid)))
                .map_err(|_| {
                    DomainError::Validation(format!("ユーザー ID の形式が不正です: {value}"))
                }),
        }
    }
}

/// 対象レベル
///
/// コースとプロジェクトで共通の 3 段階。
/// DB とクエリパラメータでは SCREAMING_SNAKE_CASE（`JUNIOR` など）で表現する。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    Junior,
    Senior,
    Master,
}

define_validated_string! {
    /// 検索キーワード
    ///
    /// 前後の空白を除去して保持する。
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 100 文字
    pub struct SearchKeyword {
        label: "検索キーワード",
        max_length: 100,
    }
}

impl SearchKeyword {
    /// 空文字列を「検索なし」として扱う
    ///
    /// クエリパラメータ `search=` は未指定と同じ意味になる。
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, DomainError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Self::new(value).map(Some),
        }
    }

    /// SQL の `ILIKE` に渡すパターン（`%keyword%`）を生成する
    ///
    /// `%` と `_` と `\` はエスケープする。
    pub fn to_like_pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.0.len() + 2);
        escaped.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped.push('%');
        escaped
    }

    /// 大文字小文字を区別しない部分一致
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0.to_lowercase())
    }
}

/// カンマ区切りのタグフィルタ
///
/// いずれかのタグを含む行にマッチする（any-of）。
/// 空要素は捨て、各要素は trim する。
///
/// ```
/// use manabi_domain::value_objects::TagList;
///
/// let tags = TagList::parse("React, ,TypeScript");
/// assert_eq!(tags.as_slice(), ["React", "TypeScript"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagList(Vec<String>);

impl TagList {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// 未指定・空指定なら `None`
    pub fn parse_optional(raw: Option<&str>) -> Option<Self> {
        raw.map(Self::parse).filter(|tags| !tags.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// `tags` のいずれかがフィルタに含まれるか
    pub fn matches_any(&self, tags: &[String]) -> bool {
        tags.iter().any(|tag| self.0.contains(tag))
    }
}

/// 列挙型のクエリパラメータをパースする
///
/// strum の `EnumString` を実装した型に対して、未知の値を
/// [`DomainError::Validation`] に変換する。
pub fn parse_enum_param<T>(label: &str, raw: Option<&str>) -> Result<Option<T>, DomainError>
where
    T: std::str::FromStr,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(|_| {
            DomainError::Validation(format!("{label}の値が不正です: {value}"))
        }),
    }
}
