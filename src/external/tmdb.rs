use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::TmdbConfig;
use crate::models::{
    ActorDto, CompanyDto, GenreDto, ImageUrlBuilder, MovieDto, PersonDto,
};

/// TMDB API客户端
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("moviedeck/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build TMDB HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    /// 发送 GET 请求，404 返回 None
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "TMDB request");

        let mut query: Vec<(&str, &str)> = vec![
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ];
        query.extend_from_slice(params);

        let response = self.client
            .get(&url)
            .query(&query)
            .send()
            .await
            .with_context(|| format!("TMDB request failed: {}", path))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(anyhow!("TMDB API error: {}", response.status()));
        }

        let body = response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse TMDB response: {}", path))?;
        Ok(Some(body))
    }

    /// 获取图片服务配置
    pub async fn get_configuration(&self) -> Result<TmdbConfiguration> {
        self.get_json("/configuration", &[])
            .await?
            .ok_or_else(|| anyhow!("TMDB configuration endpoint returned 404"))
    }

    /// 获取电影详情（附带演职人员和剧照）
    pub async fn get_movie_details(&self, movie_id: i64) -> Result<Option<TmdbMovieDetails>> {
        let path = format!("/movie/{}", movie_id);
        self.get_json(
            &path,
            &[
                ("append_to_response", "credits,images"),
                ("include_image_language", "en,null"),
            ],
        )
        .await
    }

    /// 获取人员详情
    pub async fn get_person(&self, person_id: i64) -> Result<Option<TmdbPerson>> {
        let path = format!("/person/{}", person_id);
        self.get_json(&path, &[]).await
    }

    /// 获取热门电影
    pub async fn get_popular_movies(&self, page: Option<u32>) -> Result<TmdbMovieListResponse> {
        let page = page.unwrap_or(1).to_string();
        self.get_json("/movie/popular", &[("page", page.as_str())])
            .await?
            .ok_or_else(|| anyhow!("TMDB popular endpoint returned 404"))
    }
}

/// 空字符串和 null 都视为无日期
fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(parse_tmdb_date))
}

pub fn parse_tmdb_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// 空白字符串视为缺失
fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// TMDB 图片配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfiguration {
    pub images: TmdbImageConfiguration,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbImageConfiguration {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub secure_base_url: Option<String>,
    #[serde(default)]
    pub poster_sizes: Vec<String>,
}

impl TmdbConfiguration {
    /// 使用 secure_base_url 和最大的海报尺寸（列表最后一项）
    pub fn image_url_builder(&self) -> ImageUrlBuilder {
        let base = self.images.secure_base_url.as_deref()
            .or(self.images.base_url.as_deref());
        let size = self.images.poster_sizes.last();

        match (base, size) {
            (Some(base), Some(size)) => ImageUrlBuilder::new(base, size.as_str()),
            _ => ImageUrlBuilder::default(),
        }
    }
}

/// TMDB 电影列表响应（热门等）
#[derive(Debug, Deserialize, Serialize)]
pub struct TmdbMovieListResponse {
    pub page: u32,
    pub results: Vec<TmdbMovie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// TMDB电影基本信息
#[derive(Debug, Deserialize, Serialize)]
pub struct TmdbMovie {
    pub id: i64,
    pub title: String,
}

/// TMDB电影详情
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbMovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub production_companies: Vec<TmdbProductionCompany>,
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
    #[serde(default)]
    pub images: Option<TmdbImages>,
}

/// TMDB类型
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbGenre {
    pub id: i64,
    pub name: String,
}

/// TMDB制作公司
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbProductionCompany {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
}

/// TMDB演职人员信息
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

/// TMDB演员
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbCastMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// TMDB制作人员
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbCrewMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// TMDB剧照
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TmdbImages {
    #[serde(default)]
    pub backdrops: Vec<TmdbImage>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbImage {
    pub file_path: String,
}

/// TMDB人员详情
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbPerson {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// 转换器：将TMDB数据转换为内部传输对象
pub struct TmdbConverter;

impl TmdbConverter {
    /// 把电影详情与已解析的人员信息组装成 MovieDto
    ///
    /// `directors` 与 `actors` 由调用方逐个请求人员接口后传入，
    /// 转换本身不做任何网络请求。
    pub fn movie_to_dto(
        details: &TmdbMovieDetails,
        directors: Vec<PersonDto>,
        actors: Vec<ActorDto>,
    ) -> MovieDto {
        let genres = details.genres.iter()
            .map(|g| GenreDto { tmdb_id: g.id, name: g.name.clone() })
            .collect();

        let companies = details.production_companies.iter()
            .map(|c| CompanyDto {
                tmdb_id: c.id,
                name: c.name.clone(),
                logo_path: non_empty(c.logo_path.as_deref()),
                origin_country: non_empty(c.origin_country.as_deref()),
            })
            .collect();

        let mut images: Vec<String> = Vec::new();
        if let Some(ref gallery) = details.images {
            for backdrop in &gallery.backdrops {
                if !backdrop.file_path.is_empty() && !images.contains(&backdrop.file_path) {
                    images.push(backdrop.file_path.clone());
                }
            }
        }

        MovieDto {
            tmdb_id: details.id,
            title: details.title.clone(),
            plot: non_empty(details.overview.as_deref()),
            release_date: details.release_date,
            runtime_minutes: details.runtime.filter(|r| *r > 0),
            rating: details.vote_average,
            poster_path: non_empty(details.poster_path.as_deref()),
            backdrop_path: non_empty(details.backdrop_path.as_deref()),
            genres,
            companies,
            images,
            directors,
            actors,
        }
    }

    pub fn person_to_dto(person: &TmdbPerson) -> PersonDto {
        PersonDto {
            tmdb_id: person.id,
            full_name: person.name.clone(),
            biography: non_empty(person.biography.as_deref()),
            birth_date: person.birthday,
            photo_path: non_empty(person.profile_path.as_deref()),
        }
    }

    /// 人员接口 404 时，退化为使用演职表里的基本信息
    pub fn credit_to_dto(id: i64, name: &str, profile_path: Option<&str>) -> PersonDto {
        PersonDto {
            tmdb_id: id,
            full_name: name.to_string(),
            biography: None,
            birth_date: None,
            photo_path: non_empty(profile_path),
        }
    }

    pub fn actor_to_dto(cast: &TmdbCastMember, person: PersonDto) -> ActorDto {
        ActorDto {
            person,
            character: non_empty(cast.character.as_deref()),
            order: cast.order,
        }
    }

    /// 导演：job 为 Director 的制作人员，按人员 ID 去重
    pub fn directors(credits: &TmdbCredits) -> Vec<&TmdbCrewMember> {
        let mut seen = std::collections::HashSet::new();
        credits.crew.iter()
            .filter(|c| c.job == "Director")
            .filter(|c| seen.insert(c.id))
            .collect()
    }

    /// 演员按 order 排序，limit 为 None 时不截断
    pub fn billed_cast(credits: &TmdbCredits, limit: Option<usize>) -> Vec<&TmdbCastMember> {
        let mut cast: Vec<&TmdbCastMember> = credits.cast.iter().collect();
        cast.sort_by_key(|c| c.order);
        if let Some(limit) = limit {
            cast.truncate(limit);
        }
        cast
    }
}
