//! Index settings and mappings for the catalog search indexes.
//!
//! Three indexes are managed: `movies`, `genres` and `persons`. Document
//! ids are entity uuids, so id fields are keywords; names and titles are
//! full-text; embedded objects use `nested` so per-object queries stay
//! coherent.

use serde_json::{json, Value};

/// Names of every index the provider manages.
pub const MANAGED_INDEXES: [&str; 3] = ["movies", "genres", "persons"];

/// Shared index settings (single shard, one replica).
fn base_settings() -> Value {
    json!({
        "number_of_shards": 1,
        "number_of_replicas": 1
    })
}

fn person_ref_mapping() -> Value {
    json!({
        "type": "nested",
        "properties": {
            "id": { "type": "keyword" },
            "name": { "type": "text" }
        }
    })
}

/// Settings and mappings for the `movies` index.
pub fn movies_index_settings() -> Value {
    json!({
        "settings": base_settings(),
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "title": {
                    "type": "text",
                    "fields": { "raw": { "type": "keyword" } }
                },
                "description": { "type": "text" },
                "imdb_rating": { "type": "float" },
                "genres": {
                    "type": "nested",
                    "properties": {
                        "id": { "type": "keyword" },
                        "name": { "type": "keyword" }
                    }
                },
                "directors_names": { "type": "text" },
                "actors_names": { "type": "text" },
                "writers_names": { "type": "text" },
                "directors": person_ref_mapping(),
                "actors": person_ref_mapping(),
                "writers": person_ref_mapping()
            }
        }
    })
}

/// Settings and mappings for the `genres` index.
pub fn genres_index_settings() -> Value {
    json!({
        "settings": base_settings(),
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "name": { "type": "keyword" },
                "description": { "type": "text" },
                "films": {
                    "type": "nested",
                    "properties": {
                        "id": { "type": "keyword" },
                        "title": { "type": "text" }
                    }
                }
            }
        }
    })
}

/// Settings and mappings for the `persons` index.
pub fn persons_index_settings() -> Value {
    json!({
        "settings": base_settings(),
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "name": { "type": "text" },
                "films": {
                    "type": "nested",
                    "properties": {
                        "id": { "type": "keyword" },
                        "roles": { "type": "keyword" },
                        "imdb_rating": { "type": "float" }
                    }
                }
            }
        }
    })
}

/// Settings for one managed index by name.
pub fn index_settings(index: &str) -> Option<Value> {
    match index {
        "movies" => Some(movies_index_settings()),
        "genres" => Some(genres_index_settings()),
        "persons" => Some(persons_index_settings()),
        _ => None,
    }
}
