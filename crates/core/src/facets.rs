use crate::models::{FacetKind, FacetSpec};

pub const MULTI_VALUED_MARKER: char = '*';

/// Parses a facet declaration such as `authors*,language_code`.
///
/// Tokens containing `*` are multi-valued with every `*` stripped; the rest are
/// scalar and kept verbatim. Repeated names overwrite earlier ones, and empty
/// tokens between commas are kept as an empty-named facet. Only a wholly empty
/// declaration yields an empty spec.
pub fn parse_facets(declaration: &str) -> FacetSpec {
    let mut spec = FacetSpec::new();
    if declaration.is_empty() {
        return spec;
    }

    for token in declaration.split(',') {
        if token.contains(MULTI_VALUED_MARKER) {
            spec.insert(token.replace(MULTI_VALUED_MARKER, ""), FacetKind::MultiValued);
        } else {
            spec.insert(token.to_string(), FacetKind::Scalar);
        }
    }

    spec
}
