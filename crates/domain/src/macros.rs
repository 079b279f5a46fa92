/// UUID v7 ベースの ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`Uuid` をラップ）
/// - `derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()` / `from_uuid()` / `as_uuid()`
///
/// UUID v7 は時刻順に単調増加するため、`created_at` が同一の行の
/// タイブレークキーとしてそのまま使える。
///
/// # 使用例
///
/// ```rust
/// use manabi_domain::course::CourseId;
///
/// let id = CourseId::new();
/// let restored = CourseId::from_uuid(*id.as_uuid());
/// assert_eq!(id, restored);
/// ```
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        $vis struct $Name(uuid::Uuid);

        impl $Name {
            /// 新しい ID を生成する（UUID v7）
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// 既存の UUID から ID を作成する
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// 内部の UUID 参照を取得する
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $Name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// バリデーション付き String Newtype を定義する宣言型マクロ
///
/// - `new()`: trim + 空チェック + 最大長チェック
/// - `as_str()`: 文字列参照
/// - `Display`: 平文出力
///
/// # 引数
///
/// - `$label`: エラーメッセージに使うラベル（例: `"検索キーワード"`）
/// - `$max_length`: 最大文字数（`chars().count()` でカウント）
macro_rules! define_validated_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            label: $label:expr,
            max_length: $max_length:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq,
            serde::Serialize, serde::Deserialize,
        )]
        $vis struct $Name(String);

        impl $Name {
            pub fn new(value: impl Into<String>) -> Result<Self, $crate::DomainError> {
                let value = value.into().trim().to_string();

                if value.is_empty() {
                    return Err($crate::DomainError::Validation(format!(
                        "{}は必須です",
                        $label
                    )));
                }

                if value.chars().count() > $max_length {
                    return Err($crate::DomainError::Validation(format!(
                        "{}は {} 文字以内である必要があります",
                        $label, $max_length
                    )));
                }

                Ok(Self(value))
            }

            /// 文字列参照を取得する
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// エンティティごとのソートキー列挙型を定義する宣言型マクロ
///
/// 各バリアントに公開フィールド名（クエリパラメータ `orderBy` の値）を対応付け、
/// [`SortKey`](crate::pagination::SortKey) を実装する。
/// 最初のバリアントが `Default` になる。
///
/// # 使用例
///
/// ```rust
/// use manabi_domain::{course::CourseSortKey, pagination::SortKey};
///
/// assert_eq!(CourseSortKey::from_field_name("title"), Some(CourseSortKey::Title));
/// assert_eq!(CourseSortKey::from_field_name("TITLE"), None);
/// assert_eq!(CourseSortKey::default(), CourseSortKey::CreatedAt);
/// ```
macro_rules! define_sort_key {
    (
        $(#[$meta:meta])*
        $vis:vis enum $Name:ident {
            $first:ident => $first_field:literal
            $(, $Variant:ident => $field:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $Name {
            #[default]
            $first,
            $($Variant,)*
        }

        impl $crate::pagination::SortKey for $Name {
            const ALL: &'static [Self] = &[Self::$first, $(Self::$Variant,)*];

            fn field_name(&self) -> &'static str {
                match self {
                    Self::$first => $first_field,
                    $(Self::$Variant => $field,)*
                }
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::pagination::SortKey::field_name(self))
            }
        }
    };
}
