//! Catalog-level enums and the change window scanned in one sync cycle.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::types::{GenreDocument, MovieDocument, PersonDocument};

/// The relational entity kinds whose `modified` timestamps are scanned for
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Genre,
    Filmwork,
}

impl EntityKind {
    /// Human-readable name used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Genre => "genre",
            Self::Filmwork => "filmwork",
        }
    }
}

/// The document kinds materialized into the search engine, one per index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Movie,
    Genre,
    Person,
}

impl DocumentKind {
    /// The search index this document kind is written to.
    pub fn index_name(&self) -> &'static str {
        match self {
            Self::Movie => "movies",
            Self::Genre => "genres",
            Self::Person => "persons",
        }
    }
}

/// Role a person holds on a filmwork. Closed set, stored as lowercase text
/// in the join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Director,
    Actor,
    Writer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Director => "director",
            Self::Actor => "actor",
            Self::Writer => "writer",
        }
    }
}

/// Half-open time interval `[since, until)` scanned for modifications in one
/// sync cycle. Both bounds are exclusive in the detection query (`modified >
/// since AND modified < until`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl ChangeWindow {
    pub fn new(since: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        Self { since, until }
    }
}

/// A document ready for loading, tagged with its kind.
///
/// Serializes transparently as the inner document so the loader can submit
/// the body unchanged as the bulk source line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogDocument {
    Movie(MovieDocument),
    Genre(GenreDocument),
    Person(PersonDocument),
}

impl CatalogDocument {
    /// The entity id, used as the search document id.
    pub fn id(&self) -> Uuid {
        match self {
            Self::Movie(doc) => doc.id,
            Self::Genre(doc) => doc.id,
            Self::Person(doc) => doc.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_names() {
        assert_eq!(DocumentKind::Movie.index_name(), "movies");
        assert_eq!(DocumentKind::Genre.index_name(), "genres");
        assert_eq!(DocumentKind::Person.index_name(), "persons");
    }

    #[test]
    fn test_role_values_match_join_table() {
        assert_eq!(Role::Director.as_str(), "director");
        assert_eq!(Role::Actor.as_str(), "actor");
        assert_eq!(Role::Writer.as_str(), "writer");
    }

    #[test]
    fn test_catalog_document_serializes_untagged() {
        let doc = CatalogDocument::Genre(GenreDocument {
            id: Uuid::nil(),
            name: "Drama".to_string(),
            description: None,
            films: Vec::new(),
        });

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["name"], "Drama");
        // No enum tag wrapping the body
        assert!(value.get("Genre").is_none());
    }
}
