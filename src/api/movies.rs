use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};

use super::error::ApiResult;
use super::response::{paginated, success};
use crate::api::AppState;
use crate::api_error;
use crate::database::movie_repository::{get_movie_detail, list_movies};
use crate::models::{MovieListFilters, Pagination};

/// GET /api/movies - 列出电影
pub async fn list_movies_handler(
    State(state): State<AppState>,
    Query(filters): Query<MovieListFilters>,
) -> ApiResult<impl IntoResponse> {
    let page = Pagination::new(filters.limit, filters.offset);
    let (mut movies, total) = list_movies(state.database.pool(), &filters, page).await?;

    for movie in &mut movies {
        movie.resolve_image_urls(&state.images);
    }

    Ok(paginated(movies, total, page.limit, page.offset))
}

/// GET /api/movies/:id - 获取电影详情
pub async fn get_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let mut detail = get_movie_detail(state.database.pool(), &id)
        .await?
        .ok_or_else(|| api_error!(NotFound, format!("Movie {} not found", id)))?;

    detail.resolve_image_urls(&state.images);
    Ok(success(detail))
}
