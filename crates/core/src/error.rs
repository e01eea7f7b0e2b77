use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("filter references unknown facet field: {field}")]
    UnknownFacetField { field: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("search result is missing document field `{field}`")]
    SchemaDrift { field: String },

    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SearchError {
    /// True when the caller sent something we cannot translate; every other
    /// variant is a fault on our side or the provider's.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SearchError::UnknownFacetField { .. } | SearchError::InvalidRequest(_)
        )
    }
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::SearchError;

    #[test]
    fn only_caller_mistakes_are_client_errors() {
        assert!(SearchError::UnknownFacetField {
            field: "tags".to_string()
        }
        .is_client_error());
        assert!(SearchError::InvalidRequest("bad body".to_string()).is_client_error());
        assert!(!SearchError::SchemaDrift {
            field: "sender".to_string()
        }
        .is_client_error());
        assert!(!SearchError::BackendResponse {
            backend: "azure-search".to_string(),
            details: "503".to_string(),
        }
        .is_client_error());
    }

    #[test]
    fn unknown_field_message_names_the_field() {
        let error = SearchError::UnknownFacetField {
            field: "language_code".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "filter references unknown facet field: language_code"
        );
    }
}
