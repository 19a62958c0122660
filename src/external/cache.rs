use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};

use crate::models::PersonDto;

const PERSON_CACHE_CAPACITY: u64 = 10_000;

/// TMDB 人员详情缓存
///
/// 区间导入时同一位演员会出现在多部电影里，缓存避免重复请求人员接口。
#[derive(Clone)]
pub struct TmdbCache {
    persons: Cache<i64, PersonDto>,
}

impl TmdbCache {
    pub fn new(ttl: Duration) -> Self {
        let persons = Cache::builder()
            .max_capacity(PERSON_CACHE_CAPACITY)
            .time_to_live(ttl)
            .build();

        Self { persons }
    }

    /// 获取人员缓存
    pub async fn get_person(&self, tmdb_id: i64) -> Option<PersonDto> {
        self.persons.get(&tmdb_id).await
    }

    /// 设置人员缓存
    pub async fn set_person(&self, person: PersonDto) {
        self.persons.insert(person.tmdb_id, person).await;
    }

    /// 获取缓存统计信息
    pub async fn get_stats(&self) -> CacheStats {
        self.persons.run_pending_tasks().await;
        CacheStats {
            person_cache_size: self.persons.entry_count(),
        }
    }
}

/// 缓存统计信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub person_cache_size: u64,
}
