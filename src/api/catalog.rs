use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use super::error::ApiResult;
use super::response::{paginated, success};
use crate::api::AppState;
use crate::database::catalog_repository::{list_companies, list_genres};
use crate::models::Pagination;

#[derive(Debug, Deserialize)]
pub struct ListCompaniesQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/genres - 列出类型
pub async fn list_genres_handler(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let genres = list_genres(state.database.pool()).await?;
    Ok(success(genres))
}

/// GET /api/companies - 列出制作公司
pub async fn list_companies_handler(
    State(state): State<AppState>,
    Query(params): Query<ListCompaniesQuery>,
) -> ApiResult<impl IntoResponse> {
    let page = Pagination::new(params.limit, params.offset);
    let (mut companies, total) = list_companies(state.database.pool(), page).await?;

    for entry in &mut companies {
        entry.company.logo_url = state.images.url(entry.company.logo_path.as_deref());
    }

    Ok(paginated(companies, total, page.limit, page.offset))
}
