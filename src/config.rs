use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use url::Url;

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// TMDB 配置
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub language: String,
    pub timeout_secs: u64,
    pub person_cache_ttl_secs: u64,
}

/// 导入配置
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub max_range: u32,
    /// 0 表示不限制
    pub cast_limit: usize,
}

/// 应用配置，启动时从环境变量读取一次
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub database: DatabaseConfig,
    pub tmdb: TmdbConfig,
    pub import: ImportConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let host = get("HOST", "0.0.0.0");
        let port: u16 = parse_var("PORT", &get("PORT", "3000"))?;
        let addr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("Invalid HOST/PORT: {}:{}", host, port))?;

        let database = DatabaseConfig {
            url: get("DATABASE_URL", "sqlite:./moviedeck.db?mode=rwc"),
            max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                &get("DATABASE_MAX_CONNECTIONS", "1"),
            )?,
        };
        if database.max_connections == 0 {
            return Err(anyhow!("DATABASE_MAX_CONNECTIONS must be at least 1"));
        }

        let base_url = get("TMDB_BASE_URL", "https://api.themoviedb.org/3");
        Url::parse(&base_url).with_context(|| format!("Invalid TMDB_BASE_URL: {}", base_url))?;

        let tmdb = TmdbConfig {
            api_key: lookup("TMDB_API_KEY")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            base_url,
            language: get("TMDB_LANGUAGE", "en-US"),
            timeout_secs: parse_var("TMDB_TIMEOUT_SECS", &get("TMDB_TIMEOUT_SECS", "30"))?,
            person_cache_ttl_secs: parse_var(
                "TMDB_PERSON_CACHE_TTL_SECS",
                &get("TMDB_PERSON_CACHE_TTL_SECS", "3600"),
            )?,
        };

        let import = ImportConfig {
            max_range: parse_var("IMPORT_MAX_RANGE", &get("IMPORT_MAX_RANGE", "50"))?,
            cast_limit: parse_var("IMPORT_CAST_LIMIT", &get("IMPORT_CAST_LIMIT", "20"))?,
        };
        if import.max_range == 0 {
            return Err(anyhow!("IMPORT_MAX_RANGE must be at least 1"));
        }

        Ok(Self { addr, database, tmdb, import })
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("Invalid value for {}: {}", key, value))
}
