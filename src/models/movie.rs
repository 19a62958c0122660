use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{CastMember, Genre, ImageUrlBuilder, MovieDto, Person, ProductionCompany};

/// 电影实体
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: String,
    pub tmdb_id: Option<i64>,
    pub title: String,
    pub plot: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub runtime_minutes: Option<i32>,
    pub rating: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub created_at: DateTime<Utc>,
    // 以下字段不落库，输出前由 ImageUrlBuilder 填充
    #[sqlx(default)]
    pub poster_url: Option<String>,
    #[sqlx(default)]
    pub backdrop_url: Option<String>,
}

impl Movie {
    pub fn from_dto(dto: &MovieDto) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tmdb_id: Some(dto.tmdb_id),
            title: dto.title.clone(),
            plot: dto.plot.clone(),
            release_date: dto.release_date,
            runtime_minutes: dto.runtime_minutes,
            rating: dto.rating,
            poster_path: dto.poster_path.clone(),
            backdrop_path: dto.backdrop_path.clone(),
            created_at: Utc::now(),
            poster_url: None,
            backdrop_url: None,
        }
    }

    pub fn resolve_image_urls(&mut self, images: &ImageUrlBuilder) {
        self.poster_url = images.url(self.poster_path.as_deref());
        self.backdrop_url = images.url(self.backdrop_path.as_deref());
    }
}

/// 电影剧照（背景图）
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Image {
    pub id: String,
    pub movie_id: String,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    pub url: Option<String>,
}

impl Image {
    pub fn new(movie_id: String, file_path: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            movie_id,
            file_path,
            created_at: Utc::now(),
            url: None,
        }
    }
}

/// 电影详情响应（包含演职人员、类型、公司、剧照）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetailResponse {
    #[serde(flatten)]
    pub movie: Movie,
    pub cast: Vec<CastMember>,
    pub directors: Vec<Person>,
    pub genres: Vec<Genre>,
    pub companies: Vec<ProductionCompany>,
    pub images: Vec<Image>,
}

impl MovieDetailResponse {
    pub fn resolve_image_urls(&mut self, images: &ImageUrlBuilder) {
        self.movie.resolve_image_urls(images);
        for member in &mut self.cast {
            member.photo_url = images.url(member.photo_path.as_deref());
        }
        for director in &mut self.directors {
            director.resolve_image_urls(images);
        }
        for company in &mut self.companies {
            company.logo_url = images.url(company.logo_path.as_deref());
        }
        for image in &mut self.images {
            image.url = images.url(Some(&image.file_path));
        }
    }
}

/// 电影列表筛选条件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieListFilters {
    pub query: Option<String>,
    pub genre_id: Option<String>,
    pub company_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
