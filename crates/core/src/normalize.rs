use crate::error::Result;
use crate::models::{
    ClientDocument, ClientResponse, DocumentFields, RawResultItem, SearchPage, SemanticAnswer,
};
use crate::SearchError;
use serde_json::{Map, Value};

pub const SCORE_FIELD: &str = "@search.score";
pub const HIGHLIGHTS_FIELD: &str = "@search.highlights";

/// Converts one provider page into the client response, keeping provider order.
pub fn normalize_results(page: SearchPage, semantic_enabled: bool) -> Result<ClientResponse> {
    let SearchPage {
        results,
        total_count,
        facets,
        answers,
    } = page;

    let results = results
        .map(to_client_document)
        .collect::<Result<Vec<_>>>()?;

    Ok(ClientResponse {
        count: total_count,
        facets,
        results,
        semantic_answers: semantic_enabled.then(|| number_answers(&answers)),
    })
}

pub fn to_client_document(mut item: RawResultItem) -> Result<ClientDocument> {
    let score = take_required(&mut item, SCORE_FIELD)?;
    // Only present when the query asked for highlight fields.
    let highlights = item.remove(HIGHLIGHTS_FIELD).unwrap_or(Value::Null);

    Ok(ClientDocument {
        score,
        highlights,
        document: DocumentFields {
            id: take_required(&mut item, "id")?,
            filename: take_required(&mut item, "filename")?,
            author: take_required(&mut item, "author")?,
            created_date: take_required(&mut item, "created_date")?,
            last_modified_date: take_required(&mut item, "last_modified_date")?,
            number_of_pages: take_required(&mut item, "number_of_pages")?,
            content: take_required(&mut item, "content")?,
            summary: take_required(&mut item, "summary")?,
            sentiment: take_required(&mut item, "sentiment")?,
            date: take_required(&mut item, "date")?,
            sender: take_required(&mut item, "sender")?,
        },
    })
}

pub fn number_answers(answers: &[SemanticAnswer]) -> Map<String, Value> {
    answers
        .iter()
        .enumerate()
        .map(|(index, answer)| {
            (
                format!("Question {}", index + 1),
                Value::String(answer.display_text().to_string()),
            )
        })
        .collect()
}

fn take_required(item: &mut RawResultItem, field: &str) -> Result<Value> {
    item.remove(field).ok_or_else(|| SearchError::SchemaDrift {
        field: field.to_string(),
    })
}
