//! This module defines the `CatalogRepository` trait, which provides an
//! interface for reading the relational media catalog: change detection,
//! join-relation propagation, and the per-document aggregation queries.

use catalog_indexer_shared::{ChangeWindow, EntityKind};
use uuid::Uuid;

use crate::errors::CatalogRepositoryError;
use crate::relations::JoinRelation;
use crate::types::{GenreRecord, MovieRecord, PersonRoleRow};

/// A trait that defines the read-side interface over the media catalog.
///
/// Implementors provide paginated change detection over `modified`
/// timestamps, root-id resolution through join relations, and the
/// aggregation queries backing each document kind. The catalog is read-only
/// to this system.
#[async_trait::async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Fetch one page of ids of `kind` entities whose `modified` timestamp
    /// lies strictly inside `window`, ascending by `modified`.
    ///
    /// # Arguments
    ///
    /// * `kind` - The entity kind to scan.
    /// * `window` - Exclusive change window `(since, until)`.
    /// * `limit` - Page size.
    /// * `offset` - Row offset of the page.
    ///
    /// # Returns
    ///
    /// The page of ids; an empty page signals the end of the sequence.
    async fn changed_ids(
        &self,
        kind: EntityKind,
        window: &ChangeWindow,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Uuid>, CatalogRepositoryError>;

    /// Resolve the distinct root ids referencing any of `ids` through
    /// `relation`, ascending by the root's `modified` timestamp.
    async fn resolve_roots(
        &self,
        relation: &JoinRelation,
        ids: &[Uuid],
    ) -> Result<Vec<Uuid>, CatalogRepositoryError>;

    /// Run the movie aggregation query for a batch of filmwork ids, one
    /// record per id.
    async fn movie_records(&self, ids: &[Uuid]) -> Result<Vec<MovieRecord>, CatalogRepositoryError>;

    /// Run the genre aggregation query for a batch of genre ids, one record
    /// per id.
    async fn genre_records(&self, ids: &[Uuid]) -> Result<Vec<GenreRecord>, CatalogRepositoryError>;

    /// Run the person aggregation query for a batch of person ids, one row
    /// per (person, filmwork) pair, ordered by person id.
    async fn person_role_rows(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<PersonRoleRow>, CatalogRepositoryError>;
}
