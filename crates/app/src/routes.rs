use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use cartas_search_core::{
    SearchBackend, SearchError, SearchOutcome, SearchRequest, SearchService, MISSING_QUERY_MESSAGE,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router<B>(service: Arc<SearchService<B>>) -> Router
where
    B: SearchBackend + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/Search", post(search::<B>))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn health() -> &'static str {
    "ok"
}

async fn search<B>(State(service): State<Arc<SearchService<B>>>, body: Bytes) -> Response
where
    B: SearchBackend + 'static,
{
    let request: SearchRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(error) => {
            return error_response(SearchError::InvalidRequest(format!(
                "request body is not a search request: {error}"
            )))
        }
    };

    match service.search(&request).await {
        Ok(SearchOutcome::MissingQuery) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            MISSING_QUERY_MESSAGE,
        )
            .into_response(),
        Ok(SearchOutcome::Found(response)) => (StatusCode::OK, Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: SearchError) -> Response {
    let status = if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!(%error, "search failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
