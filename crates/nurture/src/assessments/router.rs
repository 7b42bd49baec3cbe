use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::AssessmentCatalog;
use super::domain::AnswerSet;
use super::scoring::score;

/// Router builder exposing the questionnaire catalog and scoring endpoint.
pub fn assessment_router(catalog: Arc<AssessmentCatalog>) -> Router {
    Router::new()
        .route("/api/v1/assessments", get(list_handler))
        .route("/api/v1/assessments/:assessment_id", get(definition_handler))
        .route(
            "/api/v1/assessments/:assessment_id/score",
            post(score_handler),
        )
        .with_state(catalog)
}

#[derive(Debug, Deserialize)]
struct ScoreRequest {
    answers: AnswerSet,
}

#[derive(Debug, Serialize)]
struct AssessmentSummary {
    id: String,
    title: String,
    description: String,
    question_count: usize,
}

async fn list_handler(State(catalog): State<Arc<AssessmentCatalog>>) -> Response {
    let summaries: Vec<AssessmentSummary> = catalog
        .definitions()
        .iter()
        .map(|definition| AssessmentSummary {
            id: definition.id.clone(),
            title: definition.title.clone(),
            description: definition.description.clone(),
            question_count: definition.question_count(),
        })
        .collect();

    (StatusCode::OK, axum::Json(summaries)).into_response()
}

async fn definition_handler(
    State(catalog): State<Arc<AssessmentCatalog>>,
    Path(assessment_id): Path<String>,
) -> Response {
    match catalog.get(&assessment_id) {
        Some(definition) => (StatusCode::OK, axum::Json(definition.clone())).into_response(),
        None => unknown_assessment(&assessment_id),
    }
}

async fn score_handler(
    State(catalog): State<Arc<AssessmentCatalog>>,
    Path(assessment_id): Path<String>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response {
    let Some(definition) = catalog.get(&assessment_id) else {
        return unknown_assessment(&assessment_id);
    };

    match score(definition, &request.answers) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) if error.is_configuration() => {
            tracing::error!(%assessment_id, %error, "scoring ranges are misconfigured");
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

fn unknown_assessment(assessment_id: &str) -> Response {
    let payload = json!({
        "error": format!("assessment '{assessment_id}' not found"),
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}
