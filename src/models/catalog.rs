use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{CompanyDto, GenreDto};

/// 电影类型
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: String,
    pub tmdb_id: Option<i64>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Genre {
    pub fn from_dto(dto: &GenreDto) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tmdb_id: Some(dto.tmdb_id),
            name: dto.name.clone(),
            created_at: Utc::now(),
        }
    }
}

/// 制作公司
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductionCompany {
    pub id: String,
    pub tmdb_id: Option<i64>,
    pub name: String,
    pub logo_path: Option<String>,
    pub origin_country: Option<String>,
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    pub logo_url: Option<String>,
}

impl ProductionCompany {
    pub fn from_dto(dto: &CompanyDto) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tmdb_id: Some(dto.tmdb_id),
            name: dto.name.clone(),
            logo_path: dto.logo_path.clone(),
            origin_country: dto.origin_country.clone(),
            created_at: Utc::now(),
            logo_url: None,
        }
    }
}

/// 带电影数量的类型（用于API响应）
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GenreWithMovieCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub genre: Genre,
    pub movie_count: i64,
}

/// 带电影数量的制作公司（用于API响应）
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyWithMovieCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub company: ProductionCompany,
    pub movie_count: i64,
}
