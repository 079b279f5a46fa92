//! # API サーバー設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `API_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `API_PORT` | **Yes** | - | ポート番号 |
//! | `DATABASE_URL` | **Yes** | - | PostgreSQL 接続 URL |
//! | `DATABASE_MAX_CONNECTIONS` | No | `10` | 接続プールの最大接続数 |
//! | `PAGINATION_MAX_LIMIT` | No | `100` | 一覧 API の `limit` 上限 |
//!
//! ログ出力形式（`LOG_FORMAT`）は [`manabi_shared::observability::TracingConfig`] が読む。

use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_PAGINATION_MAX_LIMIT: u32 = 100;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// API サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL
    pub database_url: String,
    pub database_max_connections: u32,
    /// 一覧 API の `limit` 上限（1 以上）
    pub pagination_max_limit: u32,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        Ok(Self {
            host: lookup("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse("API_PORT", &required("API_PORT")?)?,
            database_url: required("DATABASE_URL")?,
            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .map(|v| parse_positive("DATABASE_MAX_CONNECTIONS", &v))
                .transpose()?
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            pagination_max_limit: lookup("PAGINATION_MAX_LIMIT")
                .map(|v| parse_positive("PAGINATION_MAX_LIMIT", &v))
                .transpose()?
                .unwrap_or(DEFAULT_PAGINATION_MAX_LIMIT),
        })
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

fn parse_positive(name: &'static str, value: &str) -> Result<u32, ConfigError> {
    match parse::<u32>(name, value)? {
        0 => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
        n => Ok(n),
    }
}
