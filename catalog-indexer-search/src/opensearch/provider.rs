//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate. Documents are written with the bulk
//! `index` action: a full-body overwrite keyed by document id, which makes
//! replaying a batch idempotent.

use async_trait::async_trait;
use opensearch::http::request::JsonBody;
use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use opensearch::indices::{IndicesCreateParts, IndicesExistsParts};
use opensearch::{BulkParts, OpenSearch};
use serde_json::{json, Value};
use tracing::{debug, info};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::{index_settings, MANAGED_INDEXES};
use crate::types::BulkUpsertRequest;

/// OpenSearch provider implementation.
pub struct OpenSearchProvider {
    client: OpenSearch,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If connection setup fails
    pub async fn new(url: &str) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch provider");

        Ok(Self { client })
    }

    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        Ok(response.status_code().is_success())
    }

    async fn create_index(&self, index: &str, settings: Value) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(settings)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SearchIndexError::index_creation(format!(
                "Creating index '{}' failed with status {}: {}",
                index, status, error_body
            )));
        }

        info!(index, "Created search index");
        Ok(())
    }
}

/// Build the newline-delimited bulk body: one `index` action line plus one
/// source line per document.
fn bulk_body(requests: &[BulkUpsertRequest]) -> Vec<Value> {
    let mut lines = Vec::with_capacity(requests.len() * 2);
    for request in requests {
        lines.push(json!({ "index": { "_id": request.id } }));
        lines.push(request.document.clone());
    }
    lines
}

/// Interpret a bulk response body: count successes, and fail the whole call
/// if any item failed.
fn summarize_bulk_response(index: &str, body: &Value) -> Result<usize, SearchIndexError> {
    let items = body["items"]
        .as_array()
        .ok_or_else(|| SearchIndexError::parse("bulk response has no items array"))?;

    if body["errors"].as_bool().unwrap_or(false) {
        let failures: Vec<String> = items
            .iter()
            .filter_map(|item| {
                let operation = item.get("index")?;
                let error = operation.get("error")?;
                let id = operation
                    .get("_id")
                    .and_then(Value::as_str)
                    .unwrap_or("<unknown>");
                Some(format!("{}: {}", id, error))
            })
            .collect();

        return Err(SearchIndexError::bulk_index(format!(
            "{} of {} documents failed in index '{}': {}",
            failures.len(),
            items.len(),
            index,
            failures.join("; ")
        )));
    }

    Ok(items.len())
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn ensure_indexes_exist(&self) -> Result<(), SearchIndexError> {
        for index in MANAGED_INDEXES {
            if self.index_exists(index).await? {
                debug!(index, "Search index already exists");
                continue;
            }

            let settings = index_settings(index).ok_or_else(|| {
                SearchIndexError::index_creation(format!("no settings defined for '{}'", index))
            })?;
            self.create_index(index, settings).await?;
        }

        Ok(())
    }

    async fn bulk_upsert(
        &self,
        index: &str,
        requests: &[BulkUpsertRequest],
    ) -> Result<usize, SearchIndexError> {
        if requests.is_empty() {
            return Ok(0);
        }

        let body: Vec<JsonBody<Value>> =
            bulk_body(requests).into_iter().map(JsonBody::new).collect();

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SearchIndexError::bulk_index(format!(
                "Bulk request to index '{}' failed with status {}: {}",
                index, status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let indexed = summarize_bulk_response(index, &response_body)?;
        debug!(index, indexed, "Bulk upsert acknowledged");
        Ok(indexed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str) -> BulkUpsertRequest {
        BulkUpsertRequest {
            id: id.to_string(),
            document: json!({ "id": id, "title": "Stalker" }),
        }
    }

    #[test]
    fn test_bulk_body_interleaves_actions_and_sources() {
        let lines = bulk_body(&[request("a"), request("b")]);

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], json!({ "index": { "_id": "a" } }));
        assert_eq!(lines[1]["title"], "Stalker");
        assert_eq!(lines[2], json!({ "index": { "_id": "b" } }));
    }

    #[test]
    fn test_summarize_counts_successful_items() {
        let body = json!({
            "errors": false,
            "items": [
                { "index": { "_id": "a", "status": 201 } },
                { "index": { "_id": "b", "status": 200 } }
            ]
        });

        assert_eq!(summarize_bulk_response("movies", &body).unwrap(), 2);
    }

    #[test]
    fn test_summarize_escalates_partial_failure() {
        let body = json!({
            "errors": true,
            "items": [
                { "index": { "_id": "a", "status": 200 } },
                { "index": { "_id": "b", "status": 400,
                    "error": { "type": "mapper_parsing_exception" } } }
            ]
        });

        let error = summarize_bulk_response("movies", &body).unwrap_err();
        match &error {
            SearchIndexError::BulkIndexError(msg) => {
                assert!(msg.contains("1 of 2"));
                assert!(msg.contains("b:"));
            }
            other => panic!("expected BulkIndexError, got {:?}", other),
        }
        // Partial failure must not be retried as if it were connectivity.
        assert!(!catalog_indexer_shared::RetryClass::is_transient(&error));
    }

    #[test]
    fn test_summarize_rejects_malformed_response() {
        let body = json!({ "errors": false });
        assert!(matches!(
            summarize_bulk_response("movies", &body),
            Err(SearchIndexError::ParseError(_))
        ));
    }
}
