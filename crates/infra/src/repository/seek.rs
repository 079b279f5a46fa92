//! # シーク方式のページネーション SQL
//!
//! [`FetchSpec`] を PostgreSQL の行値比較に変換する。
//!
//! ```sql
//! SELECT ... FROM courses
//! WHERE <filters>
//!   AND (created_at, id) < (SELECT created_at, id FROM courses WHERE id = $cursor)
//! ORDER BY created_at DESC, id DESC
//! LIMIT $take
//! ```
//!
//! - 並び順の列が一意でなくても `id` でタイブレークするため、ページ間で
//!   重複・欠落が起きない
//! - 厳密比較（`<` / `>`）が `skip = 1`（カーソル行自体の除外）に相当する。
//!   `skip = 0` なら `<=` / `>=`、`skip > 1` なら残りを `OFFSET` で飛ばす
//! - カーソル行の存在は事前に確認し、なければ
//!   [`InfraErrorKind::CursorNotFound`](crate::error::InfraErrorKind::CursorNotFound) を返す

use manabi_domain::pagination::{DEFAULT_CURSOR_FIELD, FetchSpec, SortDirection};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::InfraError;

/// ソートキーと SQL 列名の対応
///
/// 列名は固定文字列のみ。リクエスト由来の文字列を SQL に埋め込まない。
pub(crate) trait SortColumn: Copy {
    fn column(&self) -> &'static str;
}

/// カーソル値を行 ID として解釈する
pub(crate) fn parse_anchor<K>(spec: &FetchSpec<K>) -> Result<Option<Uuid>, InfraError> {
    let Some(anchor) = &spec.cursor else {
        return Ok(None);
    };

    if anchor.field != DEFAULT_CURSOR_FIELD {
        return Err(InfraError::invalid_input(format!(
            "カーソルに使用できないフィールドです: {}",
            anchor.field
        )));
    }

    Uuid::parse_str(&anchor.value).map(Some).map_err(|_| {
        InfraError::invalid_input(format!("カーソルの形式が不正です: {}", anchor.value))
    })
}

/// カーソルを解釈し、指す行が存在することを確認する
pub(crate) async fn resolve_anchor<K>(
    pool: &PgPool,
    table: &'static str,
    spec: &FetchSpec<K>,
) -> Result<Option<Uuid>, InfraError> {
    let Some(id) = parse_anchor(spec)? else {
        return Ok(None);
    };

    let sql = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE id = $1)");
    let exists: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(pool).await?;

    if exists {
        Ok(Some(id))
    } else {
        Err(InfraError::cursor_not_found(table, id.to_string()))
    }
}

/// 一覧取得クエリのビルダー
///
/// `SELECT` → フィルタ条件（[`and_where`](Self::and_where)）→ シーク条件・並び順・
/// `LIMIT`（[`finish`](Self::finish)）の順に組み立てる。
pub(crate) struct SeekQuery<'args> {
    builder:   QueryBuilder<'args, Postgres>,
    table:     &'static str,
    has_where: bool,
}

impl<'args> SeekQuery<'args> {
    pub(crate) fn select(columns: &str, table: &'static str) -> Self {
        let mut builder = QueryBuilder::new("SELECT ");
        builder.push(columns).push(" FROM ").push(table);

        Self {
            builder,
            table,
            has_where: false,
        }
    }

    /// `WHERE` または `AND` を書き込み、条件を続けて書くためのビルダーを返す
    pub(crate) fn and_where(&mut self) -> &mut QueryBuilder<'args, Postgres> {
        self.builder
            .push(if self.has_where { " AND " } else { " WHERE " });
        self.has_where = true;
        &mut self.builder
    }

    pub(crate) fn finish<K: SortColumn>(
        mut self,
        spec: &FetchSpec<K>,
        anchor: Option<Uuid>,
    ) -> QueryBuilder<'args, Postgres> {
        let column = spec.order.field.column();
        let direction = spec.order.direction;
        let mut offset = spec.skip;

        if let Some(id) = anchor {
            let op = match (direction, spec.skip) {
                (SortDirection::Desc, 0) => "<=",
                (SortDirection::Desc, _) => "<",
                (SortDirection::Asc, 0) => ">=",
                (SortDirection::Asc, _) => ">",
            };
            offset = spec.skip.saturating_sub(1);

            let subquery = format!(
                "({column}, id) {op} (SELECT {column}, id FROM {table} WHERE id = ",
                table = self.table
            );
            self.and_where().push(subquery).push_bind(id).push(")");
        }

        let dir = direction.as_sql();
        self.builder
            .push(format!(" ORDER BY {column} {dir}, id {dir}"))
            .push(" LIMIT ")
            .push_bind(i64::from(spec.take));

        if offset > 0 {
            self.builder.push(" OFFSET ").push_bind(i64::from(offset));
        }

        self.builder
    }
}
