use crate::error::Result;
use crate::facets::parse_facets;
use crate::filter::build_filter;
use crate::models::{FilterClause, QueryOptions, SearchRequest, SemanticOptions};

/// Everything the assembler needs from one client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInput<'a> {
    pub text: &'a str,
    pub top: i64,
    pub skip: i64,
    pub filters: &'a [FilterClause],
    pub semantic_enabled: bool,
}

impl<'a> QueryInput<'a> {
    /// Applies the request defaults; `None` when the request carries no query text.
    pub fn from_request(request: &'a SearchRequest) -> Option<Self> {
        Some(Self {
            text: request.query_text()?,
            top: request.top(),
            skip: request.skip(),
            filters: request.filters(),
            semantic_enabled: request.semantic_enabled(),
        })
    }
}

pub fn assemble_query(input: &QueryInput<'_>, facet_declaration: &str) -> Result<QueryOptions> {
    let facets = parse_facets(facet_declaration);
    let filter = if input.filters.is_empty() {
        String::new()
    } else {
        build_filter(input.filters, &facets)?
    };

    Ok(QueryOptions {
        search_text: input.text.to_string(),
        top: input.top,
        skip: input.skip,
        facets,
        filter,
        include_total_count: true,
        semantic: input.semantic_enabled.then(SemanticOptions::extractive),
    })
}
