pub mod config;
pub mod error;
pub mod facets;
pub mod filter;
pub mod models;
pub mod normalize;
pub mod query;
pub mod service;
pub mod stores;
pub mod traits;

pub use config::{SearchConfig, DEFAULT_API_VERSION, DEFAULT_INDEX_NAME};
pub use error::SearchError;
pub use facets::parse_facets;
pub use filter::build_filter;
pub use models::{
    ClientDocument, ClientResponse, DocumentFields, FacetKind, FacetSpec, FilterClause,
    QueryOptions, RawResultItem, ResultStream, SearchPage, SearchRequest, SemanticAnswer,
    SemanticOptions, DEFAULT_SKIP, DEFAULT_TOP,
};
pub use normalize::normalize_results;
pub use query::{assemble_query, QueryInput};
pub use service::{SearchOutcome, SearchService, MISSING_QUERY_MESSAGE};
pub use stores::AzureSearchStore;
pub use traits::SearchBackend;
