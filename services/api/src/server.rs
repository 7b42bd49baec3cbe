use crate::cli::ServeArgs;
use crate::infra::{seed_sample_articles, AppState, InMemoryArticleRepository};
use crate::routes::platform_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use nurture::articles::ArticleService;
use nurture::assessments::AssessmentCatalog;
use nurture::config::AppConfig;
use nurture::error::AppError;
use nurture::research::{AggregatorLimits, DoajSource, PubMedSource, ResearchAggregator};
use nurture::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(AssessmentCatalog::standard());

    let http_client = reqwest::Client::new();
    let pubmed = Arc::new(PubMedSource::from_config(
        http_client.clone(),
        &config.research,
    ));
    let doaj = Arc::new(DoajSource::from_config(http_client, &config.research));
    let limits = AggregatorLimits {
        source_timeout: config.research.source_timeout,
        ..AggregatorLimits::default()
    };
    let aggregator = Arc::new(ResearchAggregator::with_parts(
        pubmed,
        doaj,
        Default::default(),
        Default::default(),
        limits,
    ));

    let repository = InMemoryArticleRepository::default();
    seed_sample_articles(&repository);
    let articles = Arc::new(ArticleService::new(Arc::new(repository)));

    let app = platform_routes(catalog, aggregator, articles)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "parenting guidance platform ready");

    axum::serve(listener, app).await?;
    Ok(())
}
