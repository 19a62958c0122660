use sqlx::{Pool, Row, Sqlite};
use anyhow::Result;
use serde::Serialize;

/// 验证数据库schema完整性
pub async fn verify_schema(pool: &Pool<Sqlite>) -> Result<()> {
    // 检查所有必需的表是否存在
    let required_tables = [
        "movies",
        "actors",
        "directors",
        "genres",
        "production_companies",
        "images",
        "movie_actors",
        "movie_directors",
        "movie_genres",
        "movie_companies",
    ];

    for table in required_tables {
        let exists = sqlx::query("SELECT name FROM sqlite_master WHERE type='table' AND name=?")
            .bind(table)
            .fetch_optional(pool)
            .await?;

        if exists.is_none() {
            return Err(anyhow::anyhow!("Required table '{}' does not exist", table));
        }
    }

    // 检查关键索引是否存在
    let required_indexes = [
        "idx_movies_title",
        "idx_movies_created_at",
        "idx_actors_full_name",
        "idx_directors_full_name",
        "idx_images_movie_id",
        "idx_movie_actors_actor_id",
        "idx_movie_directors_director_id",
        "idx_movie_genres_genre_id",
        "idx_movie_companies_company_id",
    ];

    for index in required_indexes {
        let exists = sqlx::query("SELECT name FROM sqlite_master WHERE type='index' AND name=?")
            .bind(index)
            .fetch_optional(pool)
            .await?;

        if exists.is_none() {
            return Err(anyhow::anyhow!("Required index '{}' does not exist", index));
        }
    }

    // 验证外键约束是否启用
    let foreign_keys_enabled: i32 = sqlx::query("PRAGMA foreign_keys")
        .fetch_one(pool)
        .await?
        .get(0);

    if foreign_keys_enabled != 1 {
        tracing::warn!("Foreign key constraints are not enabled");
    }

    tracing::info!("Database schema verification completed successfully");
    Ok(())
}

/// 获取数据库统计信息
pub async fn get_database_stats(pool: &Pool<Sqlite>) -> Result<DatabaseStats> {
    async fn count(pool: &Pool<Sqlite>, table: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        Ok(sqlx::query_scalar(&sql).fetch_one(pool).await?)
    }

    // 获取数据库文件大小
    let db_size: i64 = sqlx::query_scalar("SELECT page_count * page_size as size FROM pragma_page_count(), pragma_page_size()")
        .fetch_one(pool)
        .await?;

    Ok(DatabaseStats {
        movie_count: count(pool, "movies").await?,
        actor_count: count(pool, "actors").await?,
        director_count: count(pool, "directors").await?,
        genre_count: count(pool, "genres").await?,
        company_count: count(pool, "production_companies").await?,
        image_count: count(pool, "images").await?,
        database_size_bytes: db_size,
    })
}

/// 数据库统计信息
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStats {
    pub movie_count: i64,
    pub actor_count: i64,
    pub director_count: i64,
    pub genre_count: i64,
    pub company_count: i64,
    pub image_count: i64,
    pub database_size_bytes: i64,
}

impl DatabaseStats {
    pub fn database_size_mb(&self) -> f64 {
        self.database_size_bytes as f64 / (1024.0 * 1024.0)
    }
}
