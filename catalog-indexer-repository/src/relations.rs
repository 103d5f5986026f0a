//! Closed description of the relational schema the sync engine reads.
//!
//! The table and column names below are the only identifiers ever spliced
//! into SQL text; they are compile-time constants, never caller input.

use catalog_indexer_shared::EntityKind;

/// A many-to-many join direction from a changed (leaf) entity kind to the
/// root entity kind that is materialized as a search document.
///
/// `root_key` and `leaf_key` are columns of `join_table`; `root_key` joins
/// against the root table's `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinRelation {
    /// Short label used in log fields.
    pub name: &'static str,
    /// Table of the root entity kind, carrying `id` and `modified`.
    pub root_table: &'static str,
    /// The join table.
    pub join_table: &'static str,
    /// Join-table column referencing the root table.
    pub root_key: &'static str,
    /// Join-table column referencing the changed entity.
    pub leaf_key: &'static str,
}

/// Changed persons → filmworks embedding them (movie documents).
pub const PERSON_TO_FILMWORK: JoinRelation = JoinRelation {
    name: "person->filmwork",
    root_table: "content.film_work",
    join_table: "content.person_film_work",
    root_key: "film_work_id",
    leaf_key: "person_id",
};

/// Changed genres → filmworks carrying them (movie documents).
pub const GENRE_TO_FILMWORK: JoinRelation = JoinRelation {
    name: "genre->filmwork",
    root_table: "content.film_work",
    join_table: "content.genre_film_work",
    root_key: "film_work_id",
    leaf_key: "genre_id",
};

/// Changed filmworks → genres embedding their titles (genre documents).
pub const FILMWORK_TO_GENRE: JoinRelation = JoinRelation {
    name: "filmwork->genre",
    root_table: "content.genre",
    join_table: "content.genre_film_work",
    root_key: "genre_id",
    leaf_key: "film_work_id",
};

/// Changed filmworks → persons embedding their ratings (person documents).
pub const FILMWORK_TO_PERSON: JoinRelation = JoinRelation {
    name: "filmwork->person",
    root_table: "content.person",
    join_table: "content.person_film_work",
    root_key: "person_id",
    leaf_key: "film_work_id",
};

/// The table whose `modified` column is scanned for an entity kind.
pub fn source_table(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Person => "content.person",
        EntityKind::Genre => "content.genre",
        EntityKind::Filmwork => "content.film_work",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relations_join_on_matching_tables() {
        for relation in [
            PERSON_TO_FILMWORK,
            GENRE_TO_FILMWORK,
            FILMWORK_TO_GENRE,
            FILMWORK_TO_PERSON,
        ] {
            assert!(relation.root_table.starts_with("content."));
            assert!(relation.join_table.starts_with("content."));
            assert_ne!(relation.root_key, relation.leaf_key);
        }
    }

    #[test]
    fn test_source_tables() {
        assert_eq!(source_table(EntityKind::Person), "content.person");
        assert_eq!(source_table(EntityKind::Genre), "content.genre");
        assert_eq!(source_table(EntityKind::Filmwork), "content.film_work");
    }
}
