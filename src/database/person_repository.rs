use sqlx::{SqliteConnection, SqlitePool};

use super::query_builder::like_pattern;
use crate::models::{
    CastMember, Pagination, Person, PersonDetailResponse, PersonDto, PersonFilmography,
    PersonRole, PersonSearchFilters, PersonWithWorkCount,
};

/// 插入人员
pub async fn insert_person(conn: &mut SqliteConnection, role: PersonRole, person: &Person) -> Result<(), sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO {} (id, tmdb_id, full_name, biography, birth_date, photo_path, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
        role.table()
    );

    sqlx::query(&sql)
        .bind(&person.id)
        .bind(person.tmdb_id)
        .bind(&person.full_name)
        .bind(&person.biography)
        .bind(person.birth_date)
        .bind(&person.photo_path)
        .bind(person.created_at)
        .execute(conn)
        .await?;

    Ok(())
}

/// 根据 TMDB ID 查找或创建人员，返回本地 ID
pub async fn find_or_create_person(
    conn: &mut SqliteConnection,
    role: PersonRole,
    dto: &PersonDto,
) -> Result<String, sqlx::Error> {
    let sql = format!("SELECT id FROM {} WHERE tmdb_id = ?", role.table());
    let existing: Option<String> = sqlx::query_scalar(&sql)
        .bind(dto.tmdb_id)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let person = Person::from_dto(dto);
    insert_person(conn, role, &person).await?;
    tracing::debug!("Created {} '{}' (tmdb {})", role.label(), person.full_name, dto.tmdb_id);

    Ok(person.id)
}

/// 关联演员与电影，同一演员的重复署名保留第一条
pub async fn link_actor(
    conn: &mut SqliteConnection,
    movie_id: &str,
    actor_id: &str,
    character_name: Option<&str>,
    cast_order: i32,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO movie_actors (movie_id, actor_id, character_name, cast_order)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(movie_id, actor_id) DO NOTHING
        "#
    )
    .bind(movie_id)
    .bind(actor_id)
    .bind(character_name)
    .bind(cast_order)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 关联导演与电影
pub async fn link_director(conn: &mut SqliteConnection, movie_id: &str, director_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO movie_directors (movie_id, director_id) VALUES (?, ?) ON CONFLICT DO NOTHING"
    )
    .bind(movie_id)
    .bind(director_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 获取人员
pub async fn get_person(pool: &SqlitePool, role: PersonRole, id: &str) -> Result<Option<Person>, sqlx::Error> {
    let sql = format!("SELECT * FROM {} WHERE id = ?", role.table());
    sqlx::query_as::<_, Person>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// 列出人员（带分页和姓名搜索），返回当前页和总数
pub async fn list_people(
    pool: &SqlitePool,
    role: PersonRole,
    filters: &PersonSearchFilters,
) -> Result<(Vec<PersonWithWorkCount>, i64), sqlx::Error> {
    let page = Pagination::new(filters.limit, filters.offset);
    let search_pattern = filters
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(like_pattern);

    // 使用 LEFT JOIN 一次性获取人员和作品数量，避免 N+1 查询
    let sql = format!(
        r#"
        SELECT
            p.id, p.tmdb_id, p.full_name, p.biography, p.birth_date, p.photo_path, p.created_at,
            COUNT(l.movie_id) as work_count
        FROM {table} p
        LEFT JOIN {link} l ON p.id = l.{column}
        WHERE (? IS NULL OR p.full_name LIKE ? ESCAPE '\')
        GROUP BY p.id
        ORDER BY p.full_name ASC
        LIMIT ? OFFSET ?
        "#,
        table = role.table(),
        link = role.link_table(),
        column = role.link_column(),
    );

    let people: Vec<PersonWithWorkCount> = sqlx::query_as(&sql)
        .bind(&search_pattern)
        .bind(&search_pattern)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await?;

    let count_sql = format!(
        "SELECT COUNT(*) FROM {} WHERE (? IS NULL OR full_name LIKE ? ESCAPE '\\')",
        role.table()
    );
    let total: i64 = sqlx::query_scalar(&count_sql)
        .bind(&search_pattern)
        .bind(&search_pattern)
        .fetch_one(pool)
        .await?;

    Ok((people, total))
}

/// 获取人员详情（包含作品列表）
pub async fn get_person_with_filmography(
    pool: &SqlitePool,
    role: PersonRole,
    id: &str,
) -> Result<Option<PersonDetailResponse>, sqlx::Error> {
    let person = match get_person(pool, role, id).await? {
        Some(person) => person,
        None => return Ok(None),
    };

    let character_column = match role {
        PersonRole::Actor => "l.character_name",
        PersonRole::Director => "NULL",
    };
    let sql = format!(
        r#"
        SELECT m.id as movie_id, m.title, m.release_date, m.poster_path, {character} as character_name
        FROM {link} l
        JOIN movies m ON l.movie_id = m.id
        WHERE l.{column} = ?
        ORDER BY m.release_date DESC, m.title ASC
        "#,
        character = character_column,
        link = role.link_table(),
        column = role.link_column(),
    );

    let filmography: Vec<PersonFilmography> = sqlx::query_as(&sql)
        .bind(id)
        .fetch_all(pool)
        .await?;

    Ok(Some(PersonDetailResponse {
        person,
        role,
        filmography,
    }))
}

/// 获取电影的演员列表（按署名顺序）
pub async fn cast_for_movie(pool: &SqlitePool, movie_id: &str) -> Result<Vec<CastMember>, sqlx::Error> {
    sqlx::query_as::<_, CastMember>(
        r#"
        SELECT a.id as actor_id, a.tmdb_id, a.full_name, a.photo_path, ma.character_name, ma.cast_order
        FROM movie_actors ma
        JOIN actors a ON ma.actor_id = a.id
        WHERE ma.movie_id = ?
        ORDER BY ma.cast_order ASC, a.full_name ASC
        "#
    )
    .bind(movie_id)
    .fetch_all(pool)
    .await
}

/// 获取电影的导演列表
pub async fn directors_for_movie(pool: &SqlitePool, movie_id: &str) -> Result<Vec<Person>, sqlx::Error> {
    sqlx::query_as::<_, Person>(
        r#"
        SELECT d.*
        FROM movie_directors md
        JOIN directors d ON md.director_id = d.id
        WHERE md.movie_id = ?
        ORDER BY d.full_name ASC
        "#
    )
    .bind(movie_id)
    .fetch_all(pool)
    .await
}
