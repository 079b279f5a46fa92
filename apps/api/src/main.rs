//! # Manabi API サーバー
//!
//! 学習プラットフォームの一覧 API を提供する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `DATABASE_MAX_CONNECTIONS` | No | 接続プールの最大接続数（デフォルト: `10`） |
//! | `PAGINATION_MAX_LIMIT` | No | 一覧 API の `limit` 上限（デフォルト: `100`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! API_PORT=3000 DATABASE_URL=postgres://... cargo run -p manabi-api
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use manabi_api::{
    app_builder::{Repositories, build_app},
    config::ApiConfig,
    handler::ReadinessState,
};
use manabi_infra::{
    db,
    repository::{
        PostgresCourseRepository,
        PostgresPostRepository,
        PostgresProjectRepository,
        PostgresQuestionRepository,
        PostgresReportRepository,
    },
};
use manabi_shared::observability::TracingConfig;
use tokio::net::TcpListener;

/// API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("manabi-api");
    manabi_shared::observability::init_tracing(&tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "manabi-api").entered();

    // 設定読み込み
    let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    let repositories = Repositories {
        courses:   Arc::new(PostgresCourseRepository::new(pool.clone())),
        posts:     Arc::new(PostgresPostRepository::new(pool.clone())),
        questions: Arc::new(PostgresQuestionRepository::new(pool.clone())),
        reports:   Arc::new(PostgresReportRepository::new(pool.clone())),
        projects:  Arc::new(PostgresProjectRepository::new(pool.clone())),
    };
    let app = build_app(
        repositories,
        ReadinessState { pool },
        config.pagination_max_limit,
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
