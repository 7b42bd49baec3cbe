use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ArticleDraft, ArticleStatus};
use super::repository::{ArticleRepository, RepositoryError};
use super::service::{ArticleService, ArticleServiceError};

/// Router builder exposing the editorial CRUD and rotation endpoints.
pub fn article_router<R>(service: Arc<ArticleService<R>>) -> Router
where
    R: ArticleRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/articles",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route("/api/v1/articles/stats", get(stats_handler::<R>))
        .route("/api/v1/articles/rotate", post(rotate_handler::<R>))
        .route("/api/v1/articles/:article_id", get(fetch_handler::<R>))
        .route(
            "/api/v1/articles/:article_id/status",
            put(status_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    #[serde(default = "default_status")]
    status: ArticleStatus,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_status() -> ArticleStatus {
    ArticleStatus::Featured
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusRequest {
    status: ArticleStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RotateRequest {
    #[serde(default = "default_rotation_count")]
    count: usize,
}

fn default_rotation_count() -> usize {
    3
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<ArticleService<R>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    R: ArticleRepository + 'static,
{
    match service.list(params.status, params.limit) {
        Ok(articles) => (StatusCode::OK, axum::Json(articles)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<ArticleService<R>>>,
    axum::Json(draft): axum::Json<ArticleDraft>,
) -> Response
where
    R: ArticleRepository + 'static,
{
    match service.create(draft) {
        Ok(article) => (StatusCode::CREATED, axum::Json(article)).into_response(),
        Err(ArticleServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "article already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<ArticleService<R>>>,
    Path(article_id): Path<String>,
) -> Response
where
    R: ArticleRepository + 'static,
{
    match service.get(&article_id) {
        Ok(article) => (StatusCode::OK, axum::Json(article)).into_response(),
        Err(ArticleServiceError::Repository(RepositoryError::NotFound)) => {
            not_found(&article_id)
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<ArticleService<R>>>,
    Path(article_id): Path<String>,
    axum::Json(request): axum::Json<StatusRequest>,
) -> Response
where
    R: ArticleRepository + 'static,
{
    match service.set_status(&article_id, request.status) {
        Ok(article) => (StatusCode::OK, axum::Json(article)).into_response(),
        Err(ArticleServiceError::Repository(RepositoryError::NotFound)) => {
            not_found(&article_id)
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn rotate_handler<R>(
    State(service): State<Arc<ArticleService<R>>>,
    axum::Json(request): axum::Json<RotateRequest>,
) -> Response
where
    R: ArticleRepository + 'static,
{
    match service.archive_oldest_featured(request.count) {
        Ok(archived) => {
            let payload = json!({ "archived": archived });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn stats_handler<R>(
    State(service): State<Arc<ArticleService<R>>>,
) -> Response
where
    R: ArticleRepository + 'static,
{
    match service.stats() {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(error) => internal_error(error),
    }
}

fn not_found(article_id: &str) -> Response {
    let payload = json!({
        "error": format!("article '{article_id}' not found"),
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(error: ArticleServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
