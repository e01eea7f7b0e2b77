use crate::error::Result;
use crate::SearchError;

pub const DEFAULT_INDEX_NAME: &str = "cartas-coordinador";
pub const DEFAULT_API_VERSION: &str = "2023-07-01-Preview";

/// Deployment settings, built once at startup and shared read-only.
#[derive(Clone)]
pub struct SearchConfig {
    pub search_service_name: String,
    pub search_api_key: String,
    pub search_facets: String,
    pub index_name: String,
    pub api_version: String,
}

impl SearchConfig {
    pub fn new(
        search_service_name: impl Into<String>,
        search_api_key: impl Into<String>,
        search_facets: impl Into<String>,
    ) -> Self {
        Self {
            search_service_name: search_service_name.into(),
            search_api_key: search_api_key.into(),
            search_facets: search_facets.into(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("https://{}.search.windows.net", self.search_service_name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.search_service_name.trim().is_empty() {
            return Err(SearchError::Config("search service name is empty".to_string()));
        }
        if self.search_api_key.trim().is_empty() {
            return Err(SearchError::Config("search api key is empty".to_string()));
        }
        if self.index_name.trim().is_empty() {
            return Err(SearchError::Config("index name is empty".to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("search_service_name", &self.search_service_name)
            .field("search_api_key", &"<redacted>")
            .field("search_facets", &self.search_facets)
            .field("index_name", &self.index_name)
            .field("api_version", &self.api_version)
            .finish()
    }
}
