use crate::error::Result;
use crate::models::{QueryOptions, RawResultItem, SearchPage, SemanticAnswer};
use crate::traits::SearchBackend;
use crate::{SearchConfig, SearchError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use url::Url;

const BACKEND: &str = "azure-search";

pub struct AzureSearchStore {
    client: Arc<Client>,
    endpoint: String,
    index_name: String,
    api_key: String,
    api_version: String,
}

impl AzureSearchStore {
    pub fn new(config: &SearchConfig) -> Self {
        Self::with_endpoint(config.endpoint(), config)
    }

    /// Targets an explicit base URL instead of the `*.search.windows.net` host.
    pub fn with_endpoint(endpoint: impl Into<String>, config: &SearchConfig) -> Self {
        Self {
            client: Arc::new(Client::new()),
            endpoint: endpoint.into(),
            index_name: config.index_name.clone(),
            api_key: config.search_api_key.clone(),
            api_version: config.api_version.clone(),
        }
    }

    pub fn search_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/indexes/{}/docs/search",
            self.endpoint.trim_end_matches('/'),
            self.index_name
        ))?;
        url.query_pairs_mut().append_pair("api-version", &self.api_version);
        Ok(url)
    }

    async fn post_search(&self, body: &Value) -> Result<Value> {
        let response = self
            .client
            .post(self.search_url()?)
            .header("api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "search request rejected");
            return Err(SearchError::BackendResponse {
                backend: BACKEND.to_string(),
                details: format!("{status}: {details}"),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl SearchBackend for AzureSearchStore {
    async fn search(&self, options: &QueryOptions) -> Result<SearchPage> {
        let payload = self.post_search(&search_body(options)).await?;
        let mut next = next_page_parameters(&payload);
        let mut page = parse_search_page(payload)?;

        if next.is_none() {
            return Ok(page);
        }

        // Responses are capped server side; the rest arrives through continuations.
        let mut results: Vec<RawResultItem> = page.results.by_ref().collect();
        while let Some(parameters) = next {
            let mut payload = self.post_search(&parameters).await?;
            next = next_page_parameters(&payload);
            results.extend(page_items(&mut payload)?);
            tracing::debug!(collected = results.len(), "followed search continuation");
        }
        page.results = results.into_iter();

        Ok(page)
    }
}

/// Request body for the `docs/search` POST endpoint.
pub fn search_body(options: &QueryOptions) -> Value {
    let facets: Vec<&str> = options
        .facets
        .keys()
        .map(String::as_str)
        .filter(|name| !name.is_empty())
        .collect();

    let mut body = json!({
        "search": options.search_text,
        "top": options.top,
        "skip": options.skip,
        "count": options.include_total_count,
        "facets": facets,
    });

    if let Value::Object(fields) = &mut body {
        if !options.filter.is_empty() {
            fields.insert("filter".to_string(), json!(options.filter));
        }
        if let Some(semantic) = &options.semantic {
            fields.insert("queryType".to_string(), json!(semantic.query_type));
            fields.insert("queryLanguage".to_string(), json!(semantic.query_language));
            fields.insert(
                "semanticConfiguration".to_string(),
                json!(semantic.semantic_configuration_name),
            );
            fields.insert("captions".to_string(), json!(semantic.query_caption));
            fields.insert("answers".to_string(), json!(semantic.query_answer));
        }
    }

    body
}

pub fn parse_search_page(mut payload: Value) -> Result<SearchPage> {
    let total_count = payload
        .get("@odata.count")
        .and_then(Value::as_u64)
        .ok_or_else(|| malformed("missing @odata.count"))?;

    let facets = payload
        .get_mut("@search.facets")
        .map(Value::take)
        .filter(|facets| !facets.is_null())
        .unwrap_or_else(|| Value::Object(Map::new()));

    let answers = match payload.get_mut("@search.answers").map(Value::take) {
        None | Some(Value::Null) => Vec::new(),
        Some(raw) => serde_json::from_value::<Vec<SemanticAnswer>>(raw)?,
    };

    let results = page_items(&mut payload)?;

    Ok(SearchPage {
        results: results.into_iter(),
        total_count,
        facets,
        answers,
    })
}

/// Body to POST for the next slice of results, when the service split the response.
pub fn next_page_parameters(payload: &Value) -> Option<Value> {
    payload
        .get("@search.nextPageParameters")
        .filter(|parameters| parameters.is_object())
        .cloned()
}

fn page_items(payload: &mut Value) -> Result<Vec<RawResultItem>> {
    match payload.get_mut("value").map(Value::take) {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(fields) => Ok(fields),
                _ => Err(malformed("result item is not an object")),
            })
            .collect(),
        _ => Err(malformed("missing value array")),
    }
}

fn malformed(details: &str) -> SearchError {
    SearchError::BackendResponse {
        backend: BACKEND.to_string(),
        details: details.to_string(),
    }
}
