//! Person document type for the `persons` search index.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Nested per-filmwork entry embedded in person documents: the filmwork, the
/// set of roles the person holds on it, and the filmwork's rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonFilm {
    pub id: Uuid,
    pub roles: Vec<String>,
    #[serde(default)]
    pub imdb_rating: Option<f64>,
}

/// Document representation of a person in the `persons` index. `films`
/// defaults to empty, never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDocument {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub films: Vec<PersonFilm>,
}
