//! Movie document type for the `movies` search index.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Nested person reference embedded in movie documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    pub id: Uuid,
    pub name: String,
}

/// Nested genre reference embedded in movie documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreRef {
    pub id: Uuid,
    pub name: String,
}

/// Document representation of a filmwork in the `movies` index.
///
/// The document is always written wholesale: every update replaces the full
/// body, never patches part of it. Every array field defaults to empty and is
/// serialized even when empty: consumers must never observe a null or
/// missing collection.
///
/// Person associations are partitioned by role into three plain name arrays
/// (for full-text matching) and three nested `{id, name}` arrays (for
/// faceting and linking).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDocument {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub imdb_rating: Option<f64>,
    #[serde(default)]
    pub genres: Vec<GenreRef>,
    #[serde(default)]
    pub directors_names: Vec<String>,
    #[serde(default)]
    pub actors_names: Vec<String>,
    #[serde(default)]
    pub writers_names: Vec<String>,
    #[serde(default)]
    pub directors: Vec<PersonRef>,
    #[serde(default)]
    pub actors: Vec<PersonRef>,
    #[serde(default)]
    pub writers: Vec<PersonRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_arrays_are_serialized() {
        let doc = MovieDocument {
            id: Uuid::nil(),
            title: "Solaris".to_string(),
            description: None,
            imdb_rating: None,
            genres: Vec::new(),
            directors_names: Vec::new(),
            actors_names: Vec::new(),
            writers_names: Vec::new(),
            directors: Vec::new(),
            actors: Vec::new(),
            writers: Vec::new(),
        };

        let value = serde_json::to_value(&doc).unwrap();
        for field in [
            "genres",
            "directors_names",
            "actors_names",
            "writers_names",
            "directors",
            "actors",
            "writers",
        ] {
            assert!(
                value[field].as_array().is_some_and(|a| a.is_empty()),
                "field {} must be an empty array, got {:?}",
                field,
                value[field]
            );
        }
    }
}
