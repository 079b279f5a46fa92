//! # Manabi 共有ユーティリティ
//!
//! API レスポンスの共通エンベロープと、サービス横断の Observability 基盤を提供する。
//!
//! ## 設計方針
//!
//! - ドメイン知識を含まない純粋なユーティリティのみを配置
//! - axum への依存は持たない（`IntoResponse` 変換は各サービスの責務）
//! - tracing 関連の重い依存は `observability` feature の背後に置く

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod health;
pub mod observability;
pub mod paginated_response;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
pub use paginated_response::{PaginatedResponse, PaginationMeta};
