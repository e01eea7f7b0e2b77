use crate::error::Result;
use crate::normalize::normalize_results;
use crate::query::{assemble_query, QueryInput};
use crate::traits::SearchBackend;
use crate::{ClientResponse, SearchRequest};

pub const MISSING_QUERY_MESSAGE: &str = "No query param found.";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The request had no query text; answered with a plain notice, not an error.
    MissingQuery,
    Found(ClientResponse),
}

/// Runs one client request against the backend: assemble, search, normalize.
pub struct SearchService<B>
where
    B: SearchBackend,
{
    backend: B,
    facet_declaration: String,
}

impl<B> SearchService<B>
where
    B: SearchBackend,
{
    pub fn new(backend: B, facet_declaration: impl Into<String>) -> Self {
        Self {
            backend,
            facet_declaration: facet_declaration.into(),
        }
    }

    pub fn facet_declaration(&self) -> &str {
        &self.facet_declaration
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        let Some(input) = QueryInput::from_request(request) else {
            return Ok(SearchOutcome::MissingQuery);
        };

        tracing::info!(
            q = input.text,
            top = input.top,
            skip = input.skip,
            filters = input.filters.len(),
            semantic_enabled = input.semantic_enabled,
            "search"
        );

        let options = assemble_query(&input, &self.facet_declaration)?;
        tracing::debug!(filter = %options.filter, "assembled query");

        let page = self.backend.search(&options).await.map_err(|error| {
            tracing::warn!(%error, "search backend failed");
            error
        })?;

        let response = normalize_results(page, options.is_semantic())?;
        tracing::debug!(
            count = response.count,
            returned = response.results.len(),
            "search complete"
        );
        Ok(SearchOutcome::Found(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QueryOptions, SearchPage, SemanticAnswer};
    use crate::{FilterClause, SearchError};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeBackend {
        seen: Mutex<Vec<QueryOptions>>,
        answers: Vec<SemanticAnswer>,
        fail: bool,
    }

    fn item(id: &str) -> serde_json::Map<String, Value> {
        let Value::Object(fields) = json!({
            "@search.score": 1.0,
            "@search.highlights": null,
            "id": id, "filename": "f.pdf", "author": "Juan",
            "created_date": null, "last_modified_date": null,
            "number_of_pages": 1, "content": "c", "summary": "s",
            "sentiment": "positive", "date": "2020-01-01", "sender": "x",
        }) else {
            unreachable!("literal is an object")
        };
        fields
    }

    #[async_trait]
    impl SearchBackend for FakeBackend {
        async fn search(&self, options: &QueryOptions) -> Result<SearchPage, SearchError> {
            self.seen
                .lock()
                .expect("lock poisoned")
                .push(options.clone());
            if self.fail {
                return Err(SearchError::BackendResponse {
                    backend: "fake".to_string(),
                    details: "503".to_string(),
                });
            }
            Ok(SearchPage {
                results: vec![item("1"), item("2")].into_iter(),
                total_count: 42,
                facets: json!({}),
                answers: self.answers.clone(),
            })
        }
    }

    fn request(q: &str) -> SearchRequest {
        SearchRequest {
            q: Some(q.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn missing_query_never_reaches_backend() {
        let service = SearchService::new(FakeBackend::default(), "author");
        let outcome = service
            .search(&SearchRequest::default())
            .await
            .expect("not an error");
        assert_eq!(outcome, SearchOutcome::MissingQuery);
        assert!(service.backend.seen.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn forwards_assembled_query_and_normalizes() {
        let service = SearchService::new(FakeBackend::default(), "author,tags*");
        let mut search = request("contrato");
        search.filters = Some(vec![FilterClause::new("author", "Juan")]);

        let SearchOutcome::Found(response) = service.search(&search).await.expect("search ok")
        else {
            panic!("expected results");
        };
        assert_eq!(response.count, 42);
        assert_eq!(response.results.len(), 2);
        assert!(response.semantic_answers.is_none());

        let seen = service.backend.seen.lock().expect("lock");
        assert_eq!(seen[0].filter, "author eq 'Juan'");
        assert_eq!(seen[0].top, 2);
    }

    #[tokio::test]
    async fn semantic_request_returns_numbered_answers() {
        let backend = FakeBackend {
            answers: vec![SemanticAnswer {
                key: None,
                text: "respuesta".to_string(),
                highlights: None,
            }],
            ..Default::default()
        };
        let service = SearchService::new(backend, "author");
        let mut search = request("quién firmó");
        search.semantic_enabled = Some(true);

        let SearchOutcome::Found(response) = service.search(&search).await.expect("search ok")
        else {
            panic!("expected results");
        };
        let answers = response.semantic_answers.expect("semantic requested");
        assert_eq!(answers["Question 1"], "respuesta");
    }

    #[tokio::test]
    async fn unknown_filter_field_is_client_error_without_backend_call() {
        let service = SearchService::new(FakeBackend::default(), "author");
        let mut search = request("contrato");
        search.filters = Some(vec![FilterClause::new("tags", "a")]);

        let error = service.search(&search).await.expect_err("tags undeclared");
        assert!(error.is_client_error());
        assert!(service.backend.seen.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let backend = FakeBackend {
            fail: true,
            ..Default::default()
        };
        let service = SearchService::new(backend, "author");
        let error = service
            .search(&request("contrato"))
            .await
            .expect_err("backend down");
        assert!(matches!(error, SearchError::BackendResponse { .. }));
        assert!(!error.is_client_error());
    }
}
