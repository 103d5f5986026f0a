//! Request types for search index operations.

use serde_json::Value;

/// One document to upsert in a bulk request.
///
/// The body is the complete serialized document: an upsert fully replaces
/// whatever is stored under `id`, it never merges. Re-submitting the same
/// id with the same body is therefore a no-op in effect.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkUpsertRequest {
    /// Search document id (string form of the entity id).
    pub id: String,
    /// Full document body.
    pub document: Value,
}
