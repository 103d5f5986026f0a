//! PostgreSQL implementation of the catalog repository.
//!
//! All queries are read-only. Result sets stream through the connection
//! pool page by page; nothing materializes a full table. The table and
//! column names spliced into SQL text come exclusively from the constants
//! in [`crate::relations`].

use std::collections::HashSet;

use async_trait::async_trait;
use catalog_indexer_shared::{ChangeWindow, EntityKind, Role};
use uuid::Uuid;

use crate::errors::CatalogRepositoryError;
use crate::interfaces::CatalogRepository;
use crate::relations::{source_table, JoinRelation};
use crate::types::{GenreRecord, MovieRecord, PersonRoleRow};

/// PostgreSQL-backed catalog repository.
pub struct PostgresCatalogRepository {
    /// PostgreSQL connection pool
    pool: sqlx::PgPool,
}

impl PostgresCatalogRepository {
    /// Creates a new repository over a configured connection pool.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

/// Paginated change-detection query for one source table. Both window
/// bounds are strict so the window stays half-open end to end.
fn changed_ids_sql(table: &str) -> String {
    format!(
        "SELECT id FROM {table} \
         WHERE modified > $1 AND modified < $2 \
         ORDER BY modified \
         LIMIT $3 OFFSET $4"
    )
}

/// Root-resolution query for one join relation. Duplicate root rows (one
/// per matching join row) are collapsed by the caller, order-preserving.
fn resolve_roots_sql(relation: &JoinRelation) -> String {
    format!(
        "SELECT r.id FROM {root} r \
         JOIN {join} j ON j.{root_key} = r.id \
         WHERE j.{leaf_key} = ANY($1) \
         ORDER BY r.modified",
        root = relation.root_table,
        join = relation.join_table,
        root_key = relation.root_key,
        leaf_key = relation.leaf_key,
    )
}

/// Movie aggregation: one row per filmwork, person associations partitioned
/// by role via conditional aggregation, duplicates from the join fan-out
/// collapsed with DISTINCT.
fn movie_details_sql() -> String {
    format!(
        "SELECT \
             fw.id, \
             fw.title, \
             fw.description, \
             fw.rating AS imdb_rating, \
             JSON_AGG(DISTINCT jsonb_build_object('id', g.id, 'name', g.name)) \
                 FILTER (WHERE g.id IS NOT NULL) AS genres, \
             JSON_AGG(DISTINCT jsonb_build_object('id', p.id, 'name', p.full_name)) \
                 FILTER (WHERE pfw.role = '{director}') AS directors, \
             JSON_AGG(DISTINCT jsonb_build_object('id', p.id, 'name', p.full_name)) \
                 FILTER (WHERE pfw.role = '{actor}') AS actors, \
             JSON_AGG(DISTINCT jsonb_build_object('id', p.id, 'name', p.full_name)) \
                 FILTER (WHERE pfw.role = '{writer}') AS writers, \
             ARRAY_AGG(DISTINCT p.full_name) FILTER (WHERE pfw.role = '{director}') AS directors_names, \
             ARRAY_AGG(DISTINCT p.full_name) FILTER (WHERE pfw.role = '{actor}') AS actors_names, \
             ARRAY_AGG(DISTINCT p.full_name) FILTER (WHERE pfw.role = '{writer}') AS writers_names \
         FROM content.film_work fw \
         LEFT JOIN content.person_film_work pfw ON pfw.film_work_id = fw.id \
         LEFT JOIN content.person p ON p.id = pfw.person_id \
         LEFT JOIN content.genre_film_work gfw ON gfw.film_work_id = fw.id \
         LEFT JOIN content.genre g ON g.id = gfw.genre_id \
         WHERE fw.id = ANY($1) \
         GROUP BY fw.id",
        director = Role::Director.as_str(),
        actor = Role::Actor.as_str(),
        writer = Role::Writer.as_str(),
    )
}

/// Genre aggregation: one row per genre with its filmworks nested.
fn genre_details_sql() -> String {
    "SELECT \
         g.id, \
         g.name, \
         g.description, \
         JSON_AGG(DISTINCT jsonb_build_object('id', fw.id, 'title', fw.title)) \
             FILTER (WHERE fw.id IS NOT NULL) AS films \
     FROM content.genre g \
     LEFT JOIN content.genre_film_work gfw ON gfw.genre_id = g.id \
     LEFT JOIN content.film_work fw ON fw.id = gfw.film_work_id \
     WHERE g.id = ANY($1) \
     GROUP BY g.id"
        .to_string()
}

/// Person aggregation: one row per (person, filmwork) pair with the roles
/// on that filmwork collapsed into an array; the transformer folds rows
/// into documents.
fn person_details_sql() -> String {
    "SELECT \
         p.id, \
         p.full_name AS name, \
         fw.id AS film_id, \
         fw.rating AS film_rating, \
         ARRAY_AGG(DISTINCT pfw.role) FILTER (WHERE pfw.role IS NOT NULL) AS roles \
     FROM content.person p \
     LEFT JOIN content.person_film_work pfw ON pfw.person_id = p.id \
     LEFT JOIN content.film_work fw ON fw.id = pfw.film_work_id \
     WHERE p.id = ANY($1) \
     GROUP BY p.id, p.full_name, fw.id, fw.rating \
     ORDER BY p.id"
        .to_string()
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn changed_ids(
        &self,
        kind: EntityKind,
        window: &ChangeWindow,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Uuid>, CatalogRepositoryError> {
        let sql = changed_ids_sql(source_table(kind));

        let ids = sqlx::query_scalar::<_, Uuid>(&sql)
            .bind(window.since)
            .bind(window.until)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    async fn resolve_roots(
        &self,
        relation: &JoinRelation,
        ids: &[Uuid],
    ) -> Result<Vec<Uuid>, CatalogRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = resolve_roots_sql(relation);
        let rows = sqlx::query_scalar::<_, Uuid>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        // One output row per join row; keep first occurrence to preserve
        // the ascending-modified order.
        let mut seen = HashSet::with_capacity(rows.len());
        let mut roots = Vec::new();
        for id in rows {
            if seen.insert(id) {
                roots.push(id);
            }
        }

        Ok(roots)
    }

    async fn movie_records(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<MovieRecord>, CatalogRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = sqlx::query_as::<_, MovieRecord>(&movie_details_sql())
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn genre_records(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<GenreRecord>, CatalogRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = sqlx::query_as::<_, GenreRecord>(&genre_details_sql())
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn person_role_rows(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<PersonRoleRow>, CatalogRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, PersonRoleRow>(&person_details_sql())
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::PERSON_TO_FILMWORK;

    #[test]
    fn test_changed_ids_sql_uses_strict_bounds_and_pagination() {
        let sql = changed_ids_sql("content.person");
        assert!(sql.contains("modified > $1"));
        assert!(sql.contains("modified < $2"));
        assert!(sql.contains("ORDER BY modified"));
        assert!(sql.contains("LIMIT $3 OFFSET $4"));
    }

    #[test]
    fn test_resolve_roots_sql_splices_relation() {
        let sql = resolve_roots_sql(&PERSON_TO_FILMWORK);
        assert!(sql.contains("FROM content.film_work r"));
        assert!(sql.contains("JOIN content.person_film_work j"));
        assert!(sql.contains("ON j.film_work_id = r.id"));
        assert!(sql.contains("WHERE j.person_id = ANY($1)"));
        assert!(sql.contains("ORDER BY r.modified"));
    }

    #[test]
    fn test_movie_details_sql_partitions_roles() {
        let sql = movie_details_sql();
        for role in ["director", "actor", "writer"] {
            assert!(
                sql.contains(&format!("FILTER (WHERE pfw.role = '{role}')")),
                "missing role partition for {role}"
            );
        }
        assert!(sql.contains("GROUP BY fw.id"));
    }

    #[test]
    fn test_aggregation_sql_is_batched_by_id() {
        assert!(movie_details_sql().contains("WHERE fw.id = ANY($1)"));
        assert!(genre_details_sql().contains("WHERE g.id = ANY($1)"));
        assert!(person_details_sql().contains("WHERE p.id = ANY($1)"));
    }
}
