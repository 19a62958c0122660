use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{
    CompanyDto, CompanyWithMovieCount, Genre, GenreDto, Pagination, ProductionCompany,
    GenreWithMovieCount,
};

/// 根据 TMDB ID 查找或创建类型
pub async fn find_or_create_genre(conn: &mut SqliteConnection, dto: &GenreDto) -> Result<String, sqlx::Error> {
    let existing: Option<String> = sqlx::query_scalar("SELECT id FROM genres WHERE tmdb_id = ?")
        .bind(dto.tmdb_id)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let genre = Genre::from_dto(dto);
    sqlx::query("INSERT INTO genres (id, tmdb_id, name, created_at) VALUES (?, ?, ?, ?)")
        .bind(&genre.id)
        .bind(genre.tmdb_id)
        .bind(&genre.name)
        .bind(genre.created_at)
        .execute(conn)
        .await?;

    tracing::debug!("Created genre '{}' (tmdb {})", genre.name, dto.tmdb_id);
    Ok(genre.id)
}

/// 根据 TMDB ID 查找或创建制作公司
pub async fn find_or_create_company(conn: &mut SqliteConnection, dto: &CompanyDto) -> Result<String, sqlx::Error> {
    let existing: Option<String> = sqlx::query_scalar("SELECT id FROM production_companies WHERE tmdb_id = ?")
        .bind(dto.tmdb_id)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let company = ProductionCompany::from_dto(dto);
    sqlx::query(
        r#"
        INSERT INTO production_companies (id, tmdb_id, name, logo_path, origin_country, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#
    )
    .bind(&company.id)
    .bind(company.tmdb_id)
    .bind(&company.name)
    .bind(&company.logo_path)
    .bind(&company.origin_country)
    .bind(company.created_at)
    .execute(conn)
    .await?;

    tracing::debug!("Created company '{}' (tmdb {})", company.name, dto.tmdb_id);
    Ok(company.id)
}

pub async fn link_genre(conn: &mut SqliteConnection, movie_id: &str, genre_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO movie_genres (movie_id, genre_id) VALUES (?, ?) ON CONFLICT DO NOTHING"
    )
    .bind(movie_id)
    .bind(genre_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn link_company(conn: &mut SqliteConnection, movie_id: &str, company_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO movie_companies (movie_id, company_id) VALUES (?, ?) ON CONFLICT DO NOTHING"
    )
    .bind(movie_id)
    .bind(company_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 列出所有类型及其电影数量
pub async fn list_genres(pool: &SqlitePool) -> Result<Vec<GenreWithMovieCount>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT g.id, g.tmdb_id, g.name, g.created_at, COUNT(mg.movie_id) as movie_count
        FROM genres g
        LEFT JOIN movie_genres mg ON g.id = mg.genre_id
        GROUP BY g.id
        ORDER BY g.name ASC
        "#
    )
    .fetch_all(pool)
    .await
}

/// 列出制作公司（带分页），返回当前页和总数
pub async fn list_companies(
    pool: &SqlitePool,
    page: Pagination,
) -> Result<(Vec<CompanyWithMovieCount>, i64), sqlx::Error> {
    let companies: Vec<CompanyWithMovieCount> = sqlx::query_as(
        r#"
        SELECT
            c.id, c.tmdb_id, c.name, c.logo_path, c.origin_country, c.created_at,
            COUNT(mc.movie_id) as movie_count
        FROM production_companies c
        LEFT JOIN movie_companies mc ON c.id = mc.company_id
        GROUP BY c.id
        ORDER BY movie_count DESC, c.name ASC
        LIMIT ? OFFSET ?
        "#
    )
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM production_companies")
        .fetch_one(pool)
        .await?;

    Ok((companies, total))
}

pub async fn genres_for_movie(pool: &SqlitePool, movie_id: &str) -> Result<Vec<Genre>, sqlx::Error> {
    sqlx::query_as::<_, Genre>(
        r#"
        SELECT g.*
        FROM movie_genres mg
        JOIN genres g ON mg.genre_id = g.id
        WHERE mg.movie_id = ?
        ORDER BY g.name ASC
        "#
    )
    .bind(movie_id)
    .fetch_all(pool)
    .await
}

pub async fn companies_for_movie(pool: &SqlitePool, movie_id: &str) -> Result<Vec<ProductionCompany>, sqlx::Error> {
    sqlx::query_as::<_, ProductionCompany>(
        r#"
        SELECT c.*
        FROM movie_companies mc
        JOIN production_companies c ON mc.company_id = c.id
        WHERE mc.movie_id = ?
        ORDER BY c.name ASC
        "#
    )
    .bind(movie_id)
    .fetch_all(pool)
    .await
}
