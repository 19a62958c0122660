use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{ImageUrlBuilder, PersonDto};

/// 人员角色：演员和导演分表存储，但结构一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonRole {
    Actor,
    Director,
}

impl PersonRole {
    pub fn table(self) -> &'static str {
        match self {
            PersonRole::Actor => "actors",
            PersonRole::Director => "directors",
        }
    }

    /// 电影关联表
    pub fn link_table(self) -> &'static str {
        match self {
            PersonRole::Actor => "movie_actors",
            PersonRole::Director => "movie_directors",
        }
    }

    /// 关联表中指向人员的列
    pub fn link_column(self) -> &'static str {
        match self {
            PersonRole::Actor => "actor_id",
            PersonRole::Director => "director_id",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PersonRole::Actor => "Actor",
            PersonRole::Director => "Director",
        }
    }
}

/// 人员实体（actors / directors 表共用）
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub id: String,
    pub tmdb_id: Option<i64>,
    pub full_name: String,
    pub biography: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub photo_path: Option<String>,
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    pub photo_url: Option<String>,
}

impl Person {
    pub fn from_dto(dto: &PersonDto) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tmdb_id: Some(dto.tmdb_id),
            full_name: dto.full_name.clone(),
            biography: dto.biography.clone(),
            birth_date: dto.birth_date,
            photo_path: dto.photo_path.clone(),
            created_at: Utc::now(),
            photo_url: None,
        }
    }

    pub fn resolve_image_urls(&mut self, images: &ImageUrlBuilder) {
        self.photo_url = images.url(self.photo_path.as_deref());
    }
}

/// 带作品数量的人员（用于列表）
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PersonWithWorkCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub person: Person,
    pub work_count: i64,
}

/// 人员作品信息（用于详情页的作品列表）
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PersonFilmography {
    pub movie_id: String,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub poster_path: Option<String>,
    pub character_name: Option<String>,
    #[sqlx(default)]
    pub poster_url: Option<String>,
}

/// 人员详情响应（包含作品列表）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonDetailResponse {
    #[serde(flatten)]
    pub person: Person,
    pub role: PersonRole,
    pub filmography: Vec<PersonFilmography>,
}

impl PersonDetailResponse {
    pub fn resolve_image_urls(&mut self, images: &ImageUrlBuilder) {
        self.person.resolve_image_urls(images);
        for work in &mut self.filmography {
            work.poster_url = images.url(work.poster_path.as_deref());
        }
    }
}

/// 电影中的演员信息（用于电影详情页）
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CastMember {
    pub actor_id: String,
    pub tmdb_id: Option<i64>,
    pub full_name: String,
    pub photo_path: Option<String>,
    pub character_name: Option<String>,
    pub cast_order: i64,
    #[sqlx(default)]
    pub photo_url: Option<String>,
}

/// 人员搜索过滤器
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonSearchFilters {
    pub query: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
