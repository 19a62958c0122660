use anyhow::Context;
use axum::{
    extract::State,
    response::IntoResponse,
};
use serde_json::json;

use super::AppState;
use super::error::{ApiError, ApiResult};
use super::response::success;

/// 健康检查端点
pub async fn health_check(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    // 检查数据库连接
    state.database.verify_integrity().await
        .map_err(|e| {
            tracing::error!("Health check failed: {}", e);
            ApiError::Internal("Database connection failed".to_string())
        })?;

    let tmdb_status = if state.importer.is_some() {
        "available"
    } else {
        "not_configured"
    };

    Ok(success(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "database": "connected",
        "tmdb_api": tmdb_status
    })))
}

/// 获取系统统计信息
pub async fn get_stats(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let db_stats = state.database.get_stats().await
        .context("Failed to get database stats")?;

    let person_cache_size = match state.tmdb {
        Some(ref tmdb) => tmdb.cache_stats().await.person_cache_size,
        None => 0,
    };

    Ok(success(json!({
        "movie_count": db_stats.movie_count,
        "actor_count": db_stats.actor_count,
        "director_count": db_stats.director_count,
        "genre_count": db_stats.genre_count,
        "company_count": db_stats.company_count,
        "image_count": db_stats.image_count,
        "database_size_mb": db_stats.database_size_mb(),
        "tmdb_cache": {
            "person_cache_size": person_cache_size
        },
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
