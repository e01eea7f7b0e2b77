use crate::error::Result;
use crate::models::{FacetKind, FacetSpec, FilterClause};
use crate::SearchError;

const CLAUSE_SEPARATOR: &str = " and ";

/// Builds an OData filter expression that ANDs every clause in input order.
///
/// Clause fields must be declared in `facets`; the field name is therefore
/// always a known index field and only the value needs escaping.
pub fn build_filter(clauses: &[FilterClause], facets: &FacetSpec) -> Result<String> {
    let expressions = clauses
        .iter()
        .map(|clause| clause_expression(clause, facets))
        .collect::<Result<Vec<_>>>()?;

    Ok(expressions.join(CLAUSE_SEPARATOR))
}

fn clause_expression(clause: &FilterClause, facets: &FacetSpec) -> Result<String> {
    let kind = facets
        .get(&clause.field)
        .ok_or_else(|| SearchError::UnknownFacetField {
            field: clause.field.clone(),
        })?;
    let value = escape_literal(&clause.value);

    Ok(match kind {
        FacetKind::MultiValued => {
            format!("{}/any(t: search.in(t, '{}', ','))", clause.field, value)
        }
        FacetKind::Scalar => format!("{} eq '{}'", clause.field, value),
    })
}

/// OData string literals escape a single quote by doubling it.
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}
