use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::adapters::LiteratureSource;
use super::aggregator::ResearchAggregator;
use super::domain::{ResearchRecord, SearchOutcome};

/// Router builder exposing the research search pipeline.
pub fn research_router<P, S>(aggregator: Arc<ResearchAggregator<P, S>>) -> Router
where
    P: LiteratureSource + 'static,
    S: LiteratureSource + 'static,
{
    Router::new()
        .route("/api/v1/research/search", post(search_handler::<P, S>))
        .with_state(aggregator)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchRequest {
    pub(crate) message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchResponse {
    pub(crate) query: String,
    pub(crate) sources: Vec<ResearchRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) advisory: Option<String>,
    pub(crate) follow_up_questions: Vec<String>,
}

pub(crate) async fn search_handler<P, S>(
    State(aggregator): State<Arc<ResearchAggregator<P, S>>>,
    axum::Json(request): axum::Json<SearchRequest>,
) -> Response
where
    P: LiteratureSource + 'static,
    S: LiteratureSource + 'static,
{
    let message = request.message.trim().to_string();
    if message.is_empty() {
        let payload = json!({ "error": "message is required" });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    let outcome = aggregator.search(&message).await;
    let follow_up_questions = aggregator.follow_ups(&message);

    let response = match outcome {
        SearchOutcome::Results(sources) => SearchResponse {
            query: message,
            sources,
            advisory: None,
            follow_up_questions,
        },
        SearchOutcome::Advisory(advisory) => SearchResponse {
            query: message,
            sources: Vec::new(),
            advisory: Some(advisory),
            follow_up_questions,
        },
    };

    (StatusCode::OK, axum::Json(response)).into_response()
}
