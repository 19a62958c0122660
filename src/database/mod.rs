use sqlx::{sqlite::{SqlitePoolOptions, SqliteConnectOptions}, Pool, Sqlite};
use anyhow::{Context, Result};
use std::str::FromStr;

use crate::config::DatabaseConfig;

pub mod schema;
pub mod query_builder;
pub mod movie_repository;
pub mod person_repository;
pub mod catalog_repository;

pub use query_builder::MovieQueryBuilder;
pub use schema::DatabaseStats;

#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        tracing::info!("Connecting to database: {}", config.url);

        // 配置 SQLite 连接选项
        let connect_options = SqliteConnectOptions::from_str(&config.url)
            .with_context(|| format!("Invalid DATABASE_URL: {}", config.url))?
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(30));  // 设置忙等待超时

        // SQLite 单写入者，默认只开一个连接
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(connect_options)
            .await
            .context("Failed to connect to database")?;

        Self::from_pool(pool).await
    }

    /// 在已有连接池上运行迁移并校验
    pub async fn from_pool(pool: Pool<Sqlite>) -> Result<Self> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;

        schema::verify_schema(&pool).await?;

        let stats = schema::get_database_stats(&pool).await?;
        tracing::info!(
            "Database initialized - Movies: {}, Actors: {}, Directors: {}, Size: {:.2} MB",
            stats.movie_count,
            stats.actor_count,
            stats.director_count,
            stats.database_size_mb()
        );

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// 获取数据库统计信息
    pub async fn get_stats(&self) -> Result<DatabaseStats> {
        schema::get_database_stats(&self.pool).await
    }

    /// 验证数据库完整性
    pub async fn verify_integrity(&self) -> Result<()> {
        schema::verify_schema(&self.pool).await
    }
}
