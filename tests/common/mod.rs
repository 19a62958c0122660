// 集成测试共用的内存数据库和假数据源

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;

use moviedeck_backend::database::Database;
use moviedeck_backend::external::MovieSource;
use moviedeck_backend::models::{ActorDto, CompanyDto, GenreDto, MovieDto, PersonDto};
use moviedeck_backend::services::ImportService;

/// 内存实现的电影来源，记录每次 fetch 的 ID
#[derive(Default)]
pub struct FakeSource {
    movies: HashMap<i64, MovieDto>,
    failing: HashSet<i64>,
    popular: Vec<i64>,
    pub fetched: Mutex<Vec<i64>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movie(mut self, movie: MovieDto) -> Self {
        self.movies.insert(movie.tmdb_id, movie);
        self
    }

    pub fn with_failure(mut self, tmdb_id: i64) -> Self {
        self.failing.insert(tmdb_id);
        self
    }

    pub fn with_popular(mut self, ids: &[i64]) -> Self {
        self.popular = ids.to_vec();
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }
}

#[async_trait]
impl MovieSource for FakeSource {
    async fn fetch_movie(&self, tmdb_id: i64) -> anyhow::Result<Option<MovieDto>> {
        self.fetched.lock().unwrap().push(tmdb_id);
        if self.failing.contains(&tmdb_id) {
            return Err(anyhow!("TMDB API error: 500 Internal Server Error"));
        }
        Ok(self.movies.get(&tmdb_id).cloned())
    }

    async fn popular_movie_ids(&self, _page: u32) -> anyhow::Result<Vec<i64>> {
        Ok(self.popular.clone())
    }
}

pub async fn memory_database() -> Database {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    Database::from_pool(pool).await.expect("Failed to migrate database")
}

pub fn import_service(database: &Database, source: Arc<FakeSource>) -> ImportService {
    ImportService::new(database.pool().clone(), source, 50)
}

pub fn person(tmdb_id: i64, name: &str) -> PersonDto {
    PersonDto {
        tmdb_id,
        full_name: name.to_string(),
        biography: None,
        birth_date: None,
        photo_path: Some(format!("/{}.jpg", tmdb_id)),
    }
}

pub fn actor(tmdb_id: i64, name: &str, character: &str, order: i32) -> ActorDto {
    ActorDto {
        person: person(tmdb_id, name),
        character: Some(character.to_string()),
        order,
    }
}

pub fn movie(tmdb_id: i64, title: &str) -> MovieDto {
    MovieDto {
        tmdb_id,
        title: title.to_string(),
        plot: Some(format!("Plot of {}", title)),
        release_date: NaiveDate::from_ymd_opt(1999, 3, 30),
        runtime_minutes: Some(120),
        rating: Some(7.5),
        poster_path: Some(format!("/poster{}.jpg", tmdb_id)),
        backdrop_path: None,
        genres: vec![GenreDto { tmdb_id: 28, name: "Action".to_string() }],
        companies: vec![CompanyDto {
            tmdb_id: 79,
            name: "Village Roadshow Pictures".to_string(),
            logo_path: None,
            origin_country: Some("US".to_string()),
        }],
        images: vec![format!("/backdrop{}a.jpg", tmdb_id), format!("/backdrop{}b.jpg", tmdb_id)],
        directors: vec![person(9339, "Lilly Wachowski")],
        actors: vec![
            actor(6384, "Keanu Reeves", "Neo", 0),
            actor(2975, "Laurence Fishburne", "Morpheus", 1),
        ],
    }
}
