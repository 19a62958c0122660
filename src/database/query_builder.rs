use sqlx::{QueryBuilder, Sqlite};

use crate::models::{MovieListFilters, Pagination};

/// 电影列表动态查询构建器
///
/// 同一组筛选条件既用于列表查询也用于总数查询，保证两者一致。
pub struct MovieQueryBuilder {
    query: QueryBuilder<'static, Sqlite>,
    has_where: bool,
}

impl MovieQueryBuilder {
    pub fn select() -> Self {
        Self {
            query: QueryBuilder::new("SELECT m.* FROM movies m"),
            has_where: false,
        }
    }

    pub fn count() -> Self {
        Self {
            query: QueryBuilder::new("SELECT COUNT(*) FROM movies m"),
            has_where: false,
        }
    }

    pub fn with_filters(mut self, filters: &MovieListFilters) -> Self {
        // 标题搜索
        if let Some(q) = filters.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            self.add_where_clause();
            self.query.push("m.title LIKE ");
            self.query.push_bind(like_pattern(q));
            self.query.push(" ESCAPE '\\'");
        }

        if let Some(genre_id) = filters.genre_id.as_deref().filter(|id| !id.trim().is_empty()) {
            self.add_where_clause();
            self.query.push(
                "EXISTS (SELECT 1 FROM movie_genres mg WHERE mg.movie_id = m.id AND mg.genre_id = ",
            );
            self.query.push_bind(genre_id.to_string());
            self.query.push(")");
        }

        if let Some(company_id) = filters.company_id.as_deref().filter(|id| !id.trim().is_empty()) {
            self.add_where_clause();
            self.query.push(
                "EXISTS (SELECT 1 FROM movie_companies mc WHERE mc.movie_id = m.id AND mc.company_id = ",
            );
            self.query.push_bind(company_id.to_string());
            self.query.push(")");
        }

        self
    }

    /// 最新导入的在前
    pub fn with_sorting(mut self) -> Self {
        self.query.push(" ORDER BY m.created_at DESC, m.title ASC");
        self
    }

    pub fn with_pagination(mut self, page: Pagination) -> Self {
        self.query.push(" LIMIT ");
        self.query.push_bind(page.limit);
        self.query.push(" OFFSET ");
        self.query.push_bind(page.offset);
        self
    }

    pub fn build(self) -> QueryBuilder<'static, Sqlite> {
        self.query
    }

    fn add_where_clause(&mut self) {
        if !self.has_where {
            self.query.push(" WHERE ");
            self.has_where = true;
        } else {
            self.query.push(" AND ");
        }
    }
}

/// 构造子串匹配的 LIKE 模式，搜索词中的 `%`、`_` 和 `\` 按字面匹配
///
/// 配合 `LIKE ? ESCAPE '\'` 使用。
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
