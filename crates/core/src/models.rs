use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const DEFAULT_TOP: i64 = 2;
pub const DEFAULT_SKIP: i64 = 0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FacetKind {
    Scalar,
    MultiValued,
}

/// Facet field name to kind, as declared by the deployment's facet string.
pub type FacetSpec = BTreeMap<String, FacetKind>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FilterClause {
    pub field: String,
    pub value: String,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Inbound request body. Every field is optional on the wire so that the
/// defaults can be applied here instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SearchRequest {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub top: Option<i64>,
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub filters: Option<Vec<FilterClause>>,
    #[serde(default)]
    pub semantic_enabled: Option<bool>,
}

impl SearchRequest {
    pub fn query_text(&self) -> Option<&str> {
        self.q.as_deref().filter(|text| !text.is_empty())
    }

    pub fn top(&self) -> i64 {
        self.top.unwrap_or(DEFAULT_TOP)
    }

    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(DEFAULT_SKIP)
    }

    pub fn filters(&self) -> &[FilterClause] {
        self.filters.as_deref().unwrap_or_default()
    }

    pub fn semantic_enabled(&self) -> bool {
        self.semantic_enabled.unwrap_or(false)
    }
}

pub const SEMANTIC_QUERY_TYPE: &str = "semantic";
pub const SEMANTIC_QUERY_LANGUAGE: &str = "es-ES";
pub const SEMANTIC_CONFIGURATION_NAME: &str = "semantic-config";
pub const EXTRACTIVE: &str = "extractive";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SemanticOptions {
    pub query_type: &'static str,
    pub query_language: &'static str,
    pub semantic_configuration_name: &'static str,
    pub query_caption: &'static str,
    pub query_answer: &'static str,
}

impl SemanticOptions {
    pub fn extractive() -> Self {
        Self {
            query_type: SEMANTIC_QUERY_TYPE,
            query_language: SEMANTIC_QUERY_LANGUAGE,
            semantic_configuration_name: SEMANTIC_CONFIGURATION_NAME,
            query_caption: EXTRACTIVE,
            query_answer: EXTRACTIVE,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QueryOptions {
    pub search_text: String,
    pub top: i64,
    pub skip: i64,
    pub facets: FacetSpec,
    pub filter: String,
    pub include_total_count: bool,
    #[serde(flatten)]
    pub semantic: Option<SemanticOptions>,
}

impl QueryOptions {
    pub fn is_semantic(&self) -> bool {
        self.semantic.is_some()
    }
}

/// A provider document exactly as the search service returned it, including
/// the `@search.*` annotations.
pub type RawResultItem = Map<String, Value>;

/// Provider results are handed over once and drained by value.
pub type ResultStream = std::vec::IntoIter<RawResultItem>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SemanticAnswer {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub highlights: Option<String>,
}

impl SemanticAnswer {
    pub fn display_text(&self) -> &str {
        match self.highlights.as_deref() {
            Some(highlights) if !highlights.is_empty() => highlights,
            _ => &self.text,
        }
    }
}

#[derive(Debug)]
pub struct SearchPage {
    pub results: ResultStream,
    pub total_count: u64,
    pub facets: Value,
    pub answers: Vec<SemanticAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentFields {
    pub id: Value,
    pub filename: Value,
    pub author: Value,
    pub created_date: Value,
    pub last_modified_date: Value,
    pub number_of_pages: Value,
    pub content: Value,
    pub summary: Value,
    pub sentiment: Value,
    pub date: Value,
    pub sender: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientDocument {
    pub score: Value,
    pub highlights: Value,
    pub document: DocumentFields,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientResponse {
    pub count: u64,
    pub facets: Value,
    pub results: Vec<ClientDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_answers: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_apply_to_absent_and_null_fields() {
        let request: SearchRequest =
            serde_json::from_str(r#"{"q": "contrato", "top": null}"#).expect("valid body");
        assert_eq!(request.query_text(), Some("contrato"));
        assert_eq!(request.top(), 2);
        assert_eq!(request.skip(), 0);
        assert!(request.filters().is_empty());
        assert!(!request.semantic_enabled());
    }

    #[test]
    fn empty_query_text_counts_as_missing() {
        let request = SearchRequest {
            q: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(request.query_text(), None);
    }

    #[test]
    fn answer_prefers_non_empty_highlights() {
        let answer = SemanticAnswer {
            key: None,
            text: "plain".to_string(),
            highlights: Some("<em>bold</em>".to_string()),
        };
        assert_eq!(answer.display_text(), "<em>bold</em>");

        let empty_highlight = SemanticAnswer {
            highlights: Some(String::new()),
            ..answer
        };
        assert_eq!(empty_highlight.display_text(), "plain");
    }

    #[test]
    fn response_omits_semantic_answers_when_absent() {
        let response = ClientResponse {
            count: 0,
            facets: Value::Object(Map::new()),
            results: Vec::new(),
            semantic_answers: None,
        };
        let encoded = serde_json::to_value(&response).expect("serializable");
        assert!(encoded.get("semantic_answers").is_none());
    }
}
