// 导入流程集成测试
//
// 使用内存 SQLite 和假数据源，验证区间导入的去重、跳过和失败处理

mod common;

use std::sync::Arc;

use common::{actor, import_service, memory_database, movie, FakeSource};
use moviedeck_backend::config::DatabaseConfig;
use moviedeck_backend::database::{movie_repository, person_repository, Database};
use moviedeck_backend::models::{
    MovieListFilters, Pagination, PersonRole, PersonSearchFilters, SkipReason, ValidationError,
};
use moviedeck_backend::services::ImportError;

#[tokio::test]
async fn test_import_range_persists_movie_and_dependents() {
    let database = memory_database().await;
    let source = Arc::new(FakeSource::new().with_movie(movie(603, "The Matrix")));
    let service = import_service(&database, source.clone());

    let report = service.import_range(603, 603).await.unwrap();
    assert_eq!(report.requested, 1);
    assert_eq!(report.imported.len(), 1);
    assert_eq!(report.imported[0].title, "The Matrix");

    let stats = database.get_stats().await.unwrap();
    assert_eq!(stats.movie_count, 1);
    assert_eq!(stats.actor_count, 2);
    assert_eq!(stats.director_count, 1);
    assert_eq!(stats.genre_count, 1);
    assert_eq!(stats.company_count, 1);
    assert_eq!(stats.image_count, 2);

    let detail = movie_repository::get_movie_detail(database.pool(), &report.imported[0].movie_id)
        .await
        .unwrap()
        .expect("Movie should exist");
    assert_eq!(detail.movie.tmdb_id, Some(603));
    assert_eq!(detail.cast[0].full_name, "Keanu Reeves");
    assert_eq!(detail.cast[0].character_name.as_deref(), Some("Neo"));
    assert_eq!(detail.cast[1].cast_order, 1);
    assert_eq!(detail.directors[0].full_name, "Lilly Wachowski");
    assert_eq!(detail.genres[0].name, "Action");
    assert_eq!(detail.images[0].file_path, "/backdrop603a.jpg");
}

#[tokio::test]
async fn test_reimport_skips_without_fetching() {
    let database = memory_database().await;
    let source = Arc::new(
        FakeSource::new()
            .with_movie(movie(1, "First"))
            .with_movie(movie(2, "Second")),
    );
    let service = import_service(&database, source.clone());

    let first = service.import_range(1, 2).await.unwrap();
    assert_eq!(first.imported.len(), 2);
    assert_eq!(source.fetch_count(), 2);

    let second = service.import_range(1, 2).await.unwrap();
    assert!(second.imported.is_empty());
    assert_eq!(second.skipped.len(), 2);
    assert!(matches!(second.skipped[0].reason, SkipReason::AlreadyExists { .. }));
    assert_eq!(source.fetch_count(), 2, "existing movies should not be fetched again");

    assert_eq!(database.get_stats().await.unwrap().movie_count, 2);
}

#[tokio::test]
async fn test_shared_person_resolves_to_one_row() {
    let database = memory_database().await;
    let source = Arc::new(
        FakeSource::new()
            .with_movie(movie(603, "The Matrix"))
            .with_movie(movie(604, "The Matrix Reloaded")),
    );
    let service = import_service(&database, source);

    service.import_range(603, 604).await.unwrap();

    let stats = database.get_stats().await.unwrap();
    assert_eq!(stats.movie_count, 2);
    assert_eq!(stats.actor_count, 2);
    assert_eq!(stats.director_count, 1);
    assert_eq!(stats.genre_count, 1);

    let (actors, total) = person_repository::list_people(
        database.pool(),
        PersonRole::Actor,
        &PersonSearchFilters { query: Some("keanu".into()), ..Default::default() },
    )
    .await
    .unwrap();
    assert_eq!(total, 1);
    assert_eq!(actors[0].work_count, 2);
}

#[tokio::test]
async fn test_not_found_and_failures_do_not_stop_import() {
    let database = memory_database().await;
    let source = Arc::new(
        FakeSource::new()
            .with_movie(movie(10, "Ten"))
            .with_failure(11)
            .with_movie(movie(13, "Thirteen")),
    );
    let service = import_service(&database, source.clone());

    let report = service.import_range(10, 13).await.unwrap();
    assert_eq!(report.requested, 4);
    assert_eq!(report.imported.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].tmdb_id, 11);
    assert!(report.failed[0].error.contains("500"));
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].tmdb_id, 12);
    assert_eq!(report.skipped[0].reason, SkipReason::NotFound);
    assert_eq!(source.fetch_count(), 4);
}

#[tokio::test]
async fn test_invalid_range_is_rejected() {
    let database = memory_database().await;
    let service = import_service(&database, Arc::new(FakeSource::new()));

    let err = service.import_range(5, 1).await.unwrap_err();
    assert!(matches!(
        err,
        ImportError::Validation(ValidationError::RangeReversed { from: 5, to: 1 })
    ));

    let err = service.import_range(0, 1).await.unwrap_err();
    assert!(matches!(err, ImportError::Validation(ValidationError::RangeStartTooSmall(0))));

    let err = service.import_range(1, 51).await.unwrap_err();
    assert!(matches!(err, ImportError::Validation(ValidationError::RangeTooLarge { .. })));
}

#[tokio::test]
async fn test_preview_rejects_invalid_tmdb_id() {
    let database = memory_database().await;
    let source = Arc::new(FakeSource::new());
    let service = import_service(&database, source.clone());

    let err = service.preview(0).await.unwrap_err();
    assert!(matches!(err, ImportError::Validation(ValidationError::InvalidTmdbId(0))));

    let err = service.preview(-3).await.unwrap_err();
    assert!(matches!(err, ImportError::Validation(ValidationError::InvalidTmdbId(-3))));
    assert_eq!(source.fetch_count(), 0);
}

#[tokio::test]
async fn test_duplicate_credit_keeps_first() {
    let database = memory_database().await;
    let mut dto = movie(100, "Dual Roles");
    dto.actors = vec![
        actor(500, "Tom Hardy", "Reggie Kray", 0),
        actor(500, "Tom Hardy", "Ronnie Kray", 1),
    ];
    let service = import_service(&database, Arc::new(FakeSource::new().with_movie(dto)));

    let report = service.import_range(100, 100).await.unwrap();
    let detail = movie_repository::get_movie_detail(database.pool(), &report.imported[0].movie_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(detail.cast.len(), 1);
    assert_eq!(detail.cast[0].character_name.as_deref(), Some("Reggie Kray"));
}

#[tokio::test]
async fn test_same_title_and_plot_counts_as_existing() {
    let database = memory_database().await;
    let original = movie(200, "Solaris");
    let mut duplicate = movie(201, "Solaris");
    duplicate.plot = original.plot.clone();

    let service = import_service(
        &database,
        Arc::new(FakeSource::new().with_movie(original).with_movie(duplicate)),
    );

    let report = service.import_range(200, 201).await.unwrap();
    assert_eq!(report.imported.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].tmdb_id, 201);
}

#[tokio::test]
async fn test_missing_plots_compare_equal() {
    let database = memory_database().await;
    let mut first = movie(300, "Untitled");
    first.plot = None;
    let mut second = movie(301, "Untitled");
    second.plot = None;

    let service = import_service(
        &database,
        Arc::new(FakeSource::new().with_movie(first).with_movie(second)),
    );

    let report = service.import_range(300, 301).await.unwrap();
    assert_eq!(report.imported.len(), 1);
    assert!(matches!(report.skipped[0].reason, SkipReason::AlreadyExists { .. }));
}

#[tokio::test]
async fn test_import_popular_in_list_order() {
    let database = memory_database().await;
    let source = FakeSource::new()
        .with_movie(movie(550, "Fight Club"))
        .with_movie(movie(680, "Pulp Fiction"))
        .with_popular(&[680, 550, 999]);
    let service = import_service(&database, Arc::new(source));

    let report = service.import_popular(Some(1)).await.unwrap();
    let ids: Vec<i64> = report.imported.iter().map(|m| m.tmdb_id).collect();
    assert_eq!(ids, vec![680, 550]);
    assert_eq!(report.skipped[0].tmdb_id, 999);

    let err = service.import_popular(Some(0)).await.unwrap_err();
    assert!(matches!(err, ImportError::Validation(ValidationError::InvalidPage)));
}

#[tokio::test]
async fn test_list_movies_filters() {
    let database = memory_database().await;
    let mut comedy = movie(2, "Office Space");
    comedy.genres = vec![moviedeck_backend::models::GenreDto { tmdb_id: 35, name: "Comedy".into() }];
    let source = FakeSource::new().with_movie(movie(1, "The Matrix")).with_movie(comedy);
    let service = import_service(&database, Arc::new(source));
    service.import_range(1, 2).await.unwrap();

    let page = Pagination::new(None, None);
    let (movies, total) = movie_repository::list_movies(
        database.pool(),
        &MovieListFilters { query: Some("matrix".into()), ..Default::default() },
        page,
    )
    .await
    .unwrap();
    assert_eq!(total, 1);
    assert_eq!(movies[0].title, "The Matrix");

    let detail = movie_repository::get_movie_detail(database.pool(), &movies[0].id)
        .await
        .unwrap()
        .unwrap();
    let action_id = detail.genres[0].id.clone();

    let (movies, total) = movie_repository::list_movies(
        database.pool(),
        &MovieListFilters { genre_id: Some(action_id), ..Default::default() },
        page,
    )
    .await
    .unwrap();
    assert_eq!(total, 1);
    assert_eq!(movies[0].tmdb_id, Some(1));

    let (_, total) = movie_repository::list_movies(database.pool(), &MovieListFilters::default(), page)
        .await
        .unwrap();
    assert_eq!(total, 2);
}

#[tokio::test]
async fn test_import_persists_to_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("moviedeck.db").display()),
        max_connections: 1,
    };

    {
        let database = Database::connect(&config).await.unwrap();
        let service = import_service(&database, Arc::new(FakeSource::new().with_movie(movie(42, "Answer"))));
        service.import_range(42, 42).await.unwrap();
        database.pool().close().await;
    }

    let database = Database::connect(&config).await.unwrap();
    let existing = movie_repository::find_movie_id_by_tmdb_id(database.pool(), 42)
        .await
        .unwrap();
    assert!(existing.is_some());
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let database = memory_database().await;
    let mut percent = movie(1, "100% Wolf");
    percent.actors = vec![actor(700, "Ilai_Swindells", "Freddy", 0)];
    let source = FakeSource::new()
        .with_movie(percent)
        .with_movie(movie(2, "The Matrix"));
    let service = import_service(&database, Arc::new(source));
    service.import_range(1, 2).await.unwrap();

    let page = Pagination::new(None, None);
    let search = |q: &str| MovieListFilters { query: Some(q.into()), ..Default::default() };

    let (movies, total) = movie_repository::list_movies(database.pool(), &search("%"), page)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(movies[0].title, "100% Wolf");

    let (_, total) = movie_repository::list_movies(database.pool(), &search("_"), page)
        .await
        .unwrap();
    assert_eq!(total, 0);

    let (actors, total) = person_repository::list_people(
        database.pool(),
        PersonRole::Actor,
        &PersonSearchFilters { query: Some("_".into()), ..Default::default() },
    )
    .await
    .unwrap();
    assert_eq!(total, 1);
    assert_eq!(actors[0].person.full_name, "Ilai_Swindells");
}
