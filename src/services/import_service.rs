use std::sync::Arc;

use sqlx::SqlitePool;
use thiserror::Error;

use crate::database::{catalog_repository, movie_repository, person_repository};
use crate::external::MovieSource;
use crate::models::{
    validation::validate_page, Image, ImportOutcome, ImportRange, ImportReport, Movie, MovieDto,
    PersonRole, ValidationError,
};

/// 导入错误
///
/// 单部电影的外部接口错误不会出现在这里，它们记录在 `ImportReport.failed` 中。
#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Movie source error: {0:#}")]
    Source(anyhow::Error),
}

/// 导入服务：从外部来源逐部拉取电影并写入本地目录
pub struct ImportService {
    pool: SqlitePool,
    source: Arc<dyn MovieSource>,
    max_range: u32,
}

impl ImportService {
    pub fn new(pool: SqlitePool, source: Arc<dyn MovieSource>, max_range: u32) -> Self {
        Self { pool, source, max_range }
    }

    /// 按 TMDB ID 闭区间顺序导入
    pub async fn import_range(&self, from: i64, to: i64) -> Result<ImportReport, ImportError> {
        let range = ImportRange::new(from, to, self.max_range)?;
        tracing::info!("Starting import of TMDB ids {}..={} ({} ids)", range.from(), range.to(), range.len());

        let mut report = ImportReport::default();
        for tmdb_id in range.ids() {
            let outcome = self.reconcile(tmdb_id).await?;
            report.record(tmdb_id, outcome);
        }

        log_report("range", &report);
        Ok(report)
    }

    /// 导入热门电影列表的一页
    pub async fn import_popular(&self, page: Option<u32>) -> Result<ImportReport, ImportError> {
        let ids = self.popular_ids(page).await?;
        tracing::info!("Starting import of {} popular movies", ids.len());

        let mut report = ImportReport::default();
        for tmdb_id in ids {
            let outcome = self.reconcile(tmdb_id).await?;
            report.record(tmdb_id, outcome);
        }

        log_report("popular", &report);
        Ok(report)
    }

    /// 获取热门电影 ID（不写库）
    pub async fn popular_ids(&self, page: Option<u32>) -> Result<Vec<i64>, ImportError> {
        let page = validate_page(page.unwrap_or(1))?;
        self.source
            .popular_movie_ids(page)
            .await
            .map_err(ImportError::Source)
    }

    /// 预览外部来源的映射结果（不写库）
    pub async fn preview(&self, tmdb_id: i64) -> Result<Option<MovieDto>, ImportError> {
        if tmdb_id < 1 {
            return Err(ValidationError::InvalidTmdbId(tmdb_id).into());
        }
        self.source
            .fetch_movie(tmdb_id)
            .await
            .map_err(ImportError::Source)
    }

    /// 处理单个 TMDB ID；只有数据库错误会中断整个导入
    async fn reconcile(&self, tmdb_id: i64) -> Result<ImportOutcome, sqlx::Error> {
        if let Some(movie_id) = movie_repository::find_movie_id_by_tmdb_id(&self.pool, tmdb_id).await? {
            tracing::debug!("TMDB movie {} already imported as {}", tmdb_id, movie_id);
            return Ok(ImportOutcome::AlreadyExists { movie_id });
        }

        let dto = match self.source.fetch_movie(tmdb_id).await {
            Ok(Some(dto)) => dto,
            Ok(None) => {
                tracing::warn!("TMDB movie {} not found, skipping", tmdb_id);
                return Ok(ImportOutcome::NotFound);
            }
            Err(e) => {
                tracing::warn!("Failed to fetch TMDB movie {}: {:#}", tmdb_id, e);
                return Ok(ImportOutcome::Failed(format!("{:#}", e)));
            }
        };

        self.persist_movie(&dto).await
    }

    /// 在一个事务中写入电影及全部关联实体
    async fn persist_movie(&self, dto: &MovieDto) -> Result<ImportOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        if let Some(movie_id) = movie_repository::find_existing_movie(
            &mut *tx,
            dto.tmdb_id,
            &dto.title,
            dto.plot.as_deref(),
        )
        .await?
        {
            tracing::info!("Movie '{}' already exists as {}, skipping", dto.title, movie_id);
            return Ok(ImportOutcome::AlreadyExists { movie_id });
        }

        let movie = Movie::from_dto(dto);
        movie_repository::insert_movie(&mut *tx, &movie).await?;

        for director in &dto.directors {
            let director_id = person_repository::find_or_create_person(&mut *tx, PersonRole::Director, director).await?;
            person_repository::link_director(&mut *tx, &movie.id, &director_id).await?;
        }

        for actor in &dto.actors {
            let actor_id = person_repository::find_or_create_person(&mut *tx, PersonRole::Actor, &actor.person).await?;
            let linked = person_repository::link_actor(
                &mut *tx,
                &movie.id,
                &actor_id,
                actor.character.as_deref(),
                actor.order,
            )
            .await?;
            if !linked {
                tracing::debug!("Duplicate credit for actor {} in '{}' ignored", actor.person.tmdb_id, movie.title);
            }
        }

        for genre in &dto.genres {
            let genre_id = catalog_repository::find_or_create_genre(&mut *tx, genre).await?;
            catalog_repository::link_genre(&mut *tx, &movie.id, &genre_id).await?;
        }

        for company in &dto.companies {
            let company_id = catalog_repository::find_or_create_company(&mut *tx, company).await?;
            catalog_repository::link_company(&mut *tx, &movie.id, &company_id).await?;
        }

        for file_path in &dto.images {
            let image = Image::new(movie.id.clone(), file_path.clone());
            movie_repository::insert_image(&mut *tx, &image).await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Imported movie '{}' (tmdb {}) with {} actors, {} directors",
            movie.title,
            dto.tmdb_id,
            dto.actors.len(),
            dto.directors.len()
        );

        Ok(ImportOutcome::Imported {
            movie_id: movie.id,
            title: movie.title,
        })
    }
}

fn log_report(kind: &str, report: &ImportReport) {
    tracing::info!("Finished {} import: {}", kind, report.summary());
}
