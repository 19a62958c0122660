use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::error::ApiResult;
use super::response::{success, ApiResponse};
use crate::api::AppState;
use crate::api_error;
use crate::models::{ImportReport, ImportRequest, PopularImportRequest};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// 导入报告作为数据，计数摘要作为消息
fn report_response(report: ImportReport) -> ApiResponse<ImportReport> {
    let summary = report.summary();
    ApiResponse::success_with_message(report, summary.to_string())
}

/// POST /api/import - 按 TMDB ID 区间导入
pub async fn import_range_handler(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> ApiResult<impl IntoResponse> {
    let report = state.importer()?.import_range(request.from, request.to).await?;
    Ok(report_response(report))
}

/// POST /api/import/popular - 导入热门电影
pub async fn import_popular_handler(
    State(state): State<AppState>,
    request: Option<Json<PopularImportRequest>>,
) -> ApiResult<impl IntoResponse> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let report = state.importer()?.import_popular(request.page).await?;
    Ok(report_response(report))
}

/// GET /api/tmdb/movies/:tmdb_id - 预览 TMDB 电影映射结果
pub async fn preview_movie_handler(
    State(state): State<AppState>,
    Path(tmdb_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let movie = state
        .importer()?
        .preview(tmdb_id)
        .await?
        .ok_or_else(|| api_error!(NotFound, format!("TMDB movie {} not found", tmdb_id)))?;

    Ok(success(movie))
}

/// GET /api/tmdb/popular - 热门电影 TMDB ID 列表
pub async fn popular_ids_handler(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> ApiResult<impl IntoResponse> {
    let ids = state.importer()?.popular_ids(params.page).await?;
    Ok(success(ids))
}
