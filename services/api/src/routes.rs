use crate::infra::{AppState, InMemoryArticleRepository};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use nurture::articles::{article_router, ArticleService};
use nurture::assessments::{assessment_router, AssessmentCatalog};
use nurture::research::{research_router, LiteratureSource, ResearchAggregator};
use serde_json::json;
use std::sync::Arc;

/// Compose the feature routers with the operational endpoints.
pub(crate) fn platform_routes<P, S>(
    catalog: Arc<AssessmentCatalog>,
    aggregator: Arc<ResearchAggregator<P, S>>,
    articles: Arc<ArticleService<InMemoryArticleRepository>>,
) -> axum::Router
where
    P: LiteratureSource + 'static,
    S: LiteratureSource + 'static,
{
    assessment_router(catalog)
        .merge(research_router(aggregator))
        .merge(article_router(articles))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{seed_sample_articles, OfflineSource};
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    fn test_router() -> axum::Router {
        let catalog = Arc::new(AssessmentCatalog::standard());
        let aggregator = Arc::new(ResearchAggregator::new(
            Arc::new(OfflineSource),
            Arc::new(OfflineSource),
        ));
        let repository = InMemoryArticleRepository::default();
        seed_sample_articles(&repository);
        let articles = Arc::new(ArticleService::new(Arc::new(repository)));

        platform_routes(catalog, aggregator, articles)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn assessment_catalog_is_served() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/assessments")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn scoring_endpoint_returns_the_moderate_band() {
        let router = test_router();
        let body = json!({
            "answers": { "q1": 3, "q2": 3, "q3": 3, "q4": 3, "q5": 3 }
        });
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/assessments/parenting-stress/score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(payload["total_score"], 15);
        assert_eq!(payload["band"]["label"], "Moderate Stress");
    }

    #[tokio::test]
    async fn research_endpoint_serves_curated_results_offline() {
        let router = test_router();
        let body = json!({ "message": "How can I help my child with tantrums?" });
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/research/search")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        let sources = payload["sources"].as_array().expect("sources array");
        assert!(sources
            .iter()
            .any(|source| source["id"] == "hawaii-tantrum-001"));
        assert_eq!(
            payload["follow_up_questions"].as_array().map(Vec::len),
            Some(4)
        );
    }

    #[tokio::test]
    async fn featured_articles_are_listed() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/articles?status=featured")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(payload.as_array().map(Vec::len), Some(2));
    }
}
