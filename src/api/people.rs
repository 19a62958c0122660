use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};

use super::error::ApiResult;
use super::response::{paginated, success};
use crate::api::AppState;
use crate::api_error;
use crate::database::person_repository::{get_person_with_filmography, list_people};
use crate::models::{Pagination, PersonRole, PersonSearchFilters};

async fn list_by_role(
    state: &AppState,
    role: PersonRole,
    filters: PersonSearchFilters,
) -> ApiResult<impl IntoResponse> {
    let page = Pagination::new(filters.limit, filters.offset);
    let (mut people, total) = list_people(state.database.pool(), role, &filters).await?;

    for entry in &mut people {
        entry.person.resolve_image_urls(&state.images);
    }

    Ok(paginated(people, total, page.limit, page.offset))
}

async fn detail_by_role(state: &AppState, role: PersonRole, id: &str) -> ApiResult<impl IntoResponse> {
    let mut detail = get_person_with_filmography(state.database.pool(), role, id)
        .await?
        .ok_or_else(|| api_error!(NotFound, format!("{} {} not found", role.label(), id)))?;

    detail.resolve_image_urls(&state.images);
    Ok(success(detail))
}

/// GET /api/actors - 列出演员
pub async fn list_actors_handler(
    State(state): State<AppState>,
    Query(filters): Query<PersonSearchFilters>,
) -> ApiResult<impl IntoResponse> {
    list_by_role(&state, PersonRole::Actor, filters).await
}

/// GET /api/actors/:id - 获取演员详情（包含作品列表）
pub async fn get_actor_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    detail_by_role(&state, PersonRole::Actor, &id).await
}

/// GET /api/directors - 列出导演
pub async fn list_directors_handler(
    State(state): State<AppState>,
    Query(filters): Query<PersonSearchFilters>,
) -> ApiResult<impl IntoResponse> {
    list_by_role(&state, PersonRole::Director, filters).await
}

/// GET /api/directors/:id - 获取导演详情
pub async fn get_director_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    detail_by_role(&state, PersonRole::Director, &id).await
}
