pub mod catalog;
pub mod error;
pub mod health;
pub mod import;
pub mod movies;
pub mod people;
pub mod response;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::database::Database;
use crate::external::TmdbMovieSource;
use crate::models::ImageUrlBuilder;
use crate::services::ImportService;
use error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    /// 未配置 TMDB API key 时为 None
    pub importer: Option<Arc<ImportService>>,
    pub tmdb: Option<TmdbMovieSource>,
    pub images: ImageUrlBuilder,
}

impl AppState {
    pub fn importer(&self) -> ApiResult<&ImportService> {
        self.importer
            .as_deref()
            .ok_or_else(|| ApiError::ExternalService("TMDB API key not configured".to_string()))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // 导入
        .route("/api/import", post(import::import_range_handler))
        .route("/api/import/popular", post(import::import_popular_handler))
        .route("/api/tmdb/movies/:tmdb_id", get(import::preview_movie_handler))
        .route("/api/tmdb/popular", get(import::popular_ids_handler))
        // 电影目录
        .route("/api/movies", get(movies::list_movies_handler))
        .route("/api/movies/:id", get(movies::get_movie_handler))
        .route("/api/actors", get(people::list_actors_handler))
        .route("/api/actors/:id", get(people::get_actor_handler))
        .route("/api/directors", get(people::list_directors_handler))
        .route("/api/directors/:id", get(people::get_director_handler))
        .route("/api/genres", get(catalog::list_genres_handler))
        .route("/api/companies", get(catalog::list_companies_handler))
        // 系统
        .route("/api/health", get(health::health_check))
        .route("/api/stats", get(health::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
