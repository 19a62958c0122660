use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 外部接口与持久化层之间的电影传输对象
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDto {
    pub tmdb_id: i64,
    pub title: String,
    pub plot: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub runtime_minutes: Option<i32>,
    pub rating: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genres: Vec<GenreDto>,
    pub companies: Vec<CompanyDto>,
    pub images: Vec<String>,        // 背景图 file_path 列表
    pub directors: Vec<PersonDto>,
    pub actors: Vec<ActorDto>,
}

/// 人员（演员/导演共用）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonDto {
    pub tmdb_id: i64,
    pub full_name: String,
    pub biography: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub photo_path: Option<String>,
}

/// 演员 = 人员 + 饰演角色
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActorDto {
    #[serde(flatten)]
    pub person: PersonDto,
    pub character: Option<String>,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenreDto {
    pub tmdb_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyDto {
    pub tmdb_id: i64,
    pub name: String,
    pub logo_path: Option<String>,
    pub origin_country: Option<String>,
}
