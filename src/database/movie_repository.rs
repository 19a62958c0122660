use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};

use super::{catalog_repository, person_repository, MovieQueryBuilder};
use crate::models::{Image, Movie, MovieDetailResponse, MovieListFilters, Pagination};

/// 插入电影
pub async fn insert_movie(conn: &mut SqliteConnection, movie: &Movie) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO movies (id, tmdb_id, title, plot, release_date, runtime_minutes, rating, poster_path, backdrop_path, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#
    )
    .bind(&movie.id)
    .bind(movie.tmdb_id)
    .bind(&movie.title)
    .bind(&movie.plot)
    .bind(movie.release_date)
    .bind(movie.runtime_minutes)
    .bind(movie.rating)
    .bind(&movie.poster_path)
    .bind(&movie.backdrop_path)
    .bind(movie.created_at)
    .execute(conn)
    .await?;

    Ok(())
}

/// 根据 TMDB ID 查找电影
pub async fn find_movie_id_by_tmdb_id<'e, E>(executor: E, tmdb_id: i64) -> Result<Option<String>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT id FROM movies WHERE tmdb_id = ?")
        .bind(tmdb_id)
        .fetch_optional(executor)
        .await
}

/// 查找已存在的同一部电影：TMDB ID 相同，或标题与简介完全一致（两者都为空也算一致）
pub async fn find_existing_movie(
    conn: &mut SqliteConnection,
    tmdb_id: i64,
    title: &str,
    plot: Option<&str>,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT id FROM movies WHERE tmdb_id = ? OR (title = ? AND plot IS ?) LIMIT 1"
    )
    .bind(tmdb_id)
    .bind(title)
    .bind(plot)
    .fetch_optional(conn)
    .await
}

/// 插入剧照，同一电影重复的路径忽略
pub async fn insert_image(conn: &mut SqliteConnection, image: &Image) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO images (id, movie_id, file_path, created_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(movie_id, file_path) DO NOTHING
        "#
    )
    .bind(&image.id)
    .bind(&image.movie_id)
    .bind(&image.file_path)
    .bind(image.created_at)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 获取电影
pub async fn get_movie(pool: &SqlitePool, id: &str) -> Result<Option<Movie>, sqlx::Error> {
    sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// 列出电影（带筛选和分页），返回当前页和总数
pub async fn list_movies(
    pool: &SqlitePool,
    filters: &MovieListFilters,
    page: Pagination,
) -> Result<(Vec<Movie>, i64), sqlx::Error> {
    let mut select = MovieQueryBuilder::select()
        .with_filters(filters)
        .with_sorting()
        .with_pagination(page)
        .build();
    let movies = select.build_query_as::<Movie>().fetch_all(pool).await?;

    let mut count = MovieQueryBuilder::count().with_filters(filters).build();
    let total: i64 = count.build_query_scalar::<i64>().fetch_one(pool).await?;

    Ok((movies, total))
}

/// 获取电影剧照（按导入顺序）
pub async fn images_for_movie(pool: &SqlitePool, movie_id: &str) -> Result<Vec<Image>, sqlx::Error> {
    sqlx::query_as::<_, Image>("SELECT * FROM images WHERE movie_id = ? ORDER BY rowid")
        .bind(movie_id)
        .fetch_all(pool)
        .await
}

/// 获取电影详情（包含演职人员、类型、公司和剧照）
pub async fn get_movie_detail(pool: &SqlitePool, id: &str) -> Result<Option<MovieDetailResponse>, sqlx::Error> {
    let movie = match get_movie(pool, id).await? {
        Some(movie) => movie,
        None => return Ok(None),
    };

    let cast = person_repository::cast_for_movie(pool, id).await?;
    let directors = person_repository::directors_for_movie(pool, id).await?;
    let genres = catalog_repository::genres_for_movie(pool, id).await?;
    let companies = catalog_repository::companies_for_movie(pool, id).await?;
    let images = images_for_movie(pool, id).await?;

    Ok(Some(MovieDetailResponse {
        movie,
        cast,
        directors,
        genres,
        companies,
        images,
    }))
}
