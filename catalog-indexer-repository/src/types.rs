//! Raw record types returned by the aggregation queries.
//!
//! Array-typed aggregates come back from SQL as `NULL` when a root has no
//! matching join rows, so every collection field here is `Option`-typed.
//! Normalizing those to empty collections is the transformer's contract,
//! not the repository's.

use catalog_indexer_shared::{FilmRef, GenreRef, PersonRef};
use sqlx::FromRow;
use uuid::Uuid;

pub use sqlx::types::Json;

/// One aggregated row per filmwork from the movie details query.
///
/// The six person-valued aggregates are produced by conditional aggregation
/// keyed on the join-table role value.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRecord {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub imdb_rating: Option<f64>,
    pub genres: Option<Json<Vec<GenreRef>>>,
    pub directors: Option<Json<Vec<PersonRef>>>,
    pub actors: Option<Json<Vec<PersonRef>>>,
    pub writers: Option<Json<Vec<PersonRef>>>,
    pub directors_names: Option<Vec<String>>,
    pub actors_names: Option<Vec<String>>,
    pub writers_names: Option<Vec<String>>,
}

/// One aggregated row per genre from the genre details query.
#[derive(Debug, Clone, FromRow)]
pub struct GenreRecord {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub films: Option<Json<Vec<FilmRef>>>,
}

/// One row per (person, filmwork) pair from the person details query, with
/// the person's roles on that filmwork collapsed into an array. A person
/// with no filmworks yields a single row with null film columns.
#[derive(Debug, Clone, FromRow)]
pub struct PersonRoleRow {
    pub id: Uuid,
    pub name: String,
    pub film_id: Option<Uuid>,
    pub film_rating: Option<f64>,
    pub roles: Option<Vec<String>>,
}
