use anyhow::Result;
use async_trait::async_trait;

use super::cache::{CacheStats, TmdbCache};
use super::tmdb::{TmdbClient, TmdbConverter};
use crate::models::{MovieDto, PersonDto};

/// 电影元数据来源
///
/// 导入服务只依赖这个 trait，测试中可以用内存实现替换 TMDB。
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// 获取电影及其演职人员，不存在时返回 None
    async fn fetch_movie(&self, tmdb_id: i64) -> Result<Option<MovieDto>>;

    /// 获取热门电影 ID 列表
    async fn popular_movie_ids(&self, page: u32) -> Result<Vec<i64>>;
}

/// 基于 TMDB API 的电影来源
#[derive(Clone)]
pub struct TmdbMovieSource {
    client: TmdbClient,
    cache: TmdbCache,
    cast_limit: Option<usize>,
}

impl TmdbMovieSource {
    /// `cast_limit` 为 0 表示导入全部演员
    pub fn new(client: TmdbClient, cache: TmdbCache, cast_limit: usize) -> Self {
        Self {
            client,
            cache,
            cast_limit: (cast_limit > 0).then_some(cast_limit),
        }
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.get_stats().await
    }

    /// 获取人员详情（带缓存），404 时使用演职表中的姓名和头像，同样写入缓存
    async fn resolve_person(
        &self,
        person_id: i64,
        name: &str,
        profile_path: Option<&str>,
    ) -> Result<PersonDto> {
        if let Some(cached) = self.cache.get_person(person_id).await {
            tracing::debug!("Cache hit for person: {}", person_id);
            return Ok(cached);
        }

        let dto = match self.client.get_person(person_id).await? {
            Some(person) => TmdbConverter::person_to_dto(&person),
            None => {
                tracing::warn!("Person {} ({}) not found on TMDB, using credit data", person_id, name);
                TmdbConverter::credit_to_dto(person_id, name, profile_path)
            }
        };

        self.cache.set_person(dto.clone()).await;
        Ok(dto)
    }
}

#[async_trait]
impl MovieSource for TmdbMovieSource {
    async fn fetch_movie(&self, tmdb_id: i64) -> Result<Option<MovieDto>> {
        let details = match self.client.get_movie_details(tmdb_id).await? {
            Some(details) => details,
            None => return Ok(None),
        };

        let credits = details.credits.clone().unwrap_or_default();

        let mut directors = Vec::new();
        for crew in TmdbConverter::directors(&credits) {
            let person = self
                .resolve_person(crew.id, &crew.name, crew.profile_path.as_deref())
                .await?;
            directors.push(person);
        }

        let mut actors = Vec::new();
        for cast in TmdbConverter::billed_cast(&credits, self.cast_limit) {
            let person = self
                .resolve_person(cast.id, &cast.name, cast.profile_path.as_deref())
                .await?;
            actors.push(TmdbConverter::actor_to_dto(cast, person));
        }

        tracing::debug!(
            "Fetched TMDB movie {} '{}' ({} directors, {} actors)",
            tmdb_id,
            details.title,
            directors.len(),
            actors.len()
        );

        Ok(Some(TmdbConverter::movie_to_dto(&details, directors, actors)))
    }

    async fn popular_movie_ids(&self, page: u32) -> Result<Vec<i64>> {
        let response = self.client.get_popular_movies(Some(page)).await?;
        Ok(response.results.into_iter().map(|m| m.id).collect())
    }
}
