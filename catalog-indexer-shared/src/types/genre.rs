//! Genre document type for the `genres` search index.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Nested filmwork reference embedded in genre documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmRef {
    pub id: Uuid,
    pub title: String,
}

/// Document representation of a genre in the `genres` index, embedding every
/// filmwork that carries the genre. `films` defaults to empty, never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreDocument {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub films: Vec<FilmRef>,
}
