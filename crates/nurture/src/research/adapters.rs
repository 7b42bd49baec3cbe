use futures::future::BoxFuture;

use super::domain::ResearchRecord;

/// Failure taxonomy for an individual source call. Every variant is
/// recoverable at the aggregation barrier: the failing adapter contributes an
/// empty list and the pipeline continues.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("could not decode upstream payload: {0}")]
    Decode(String),
    #[error("source call exceeded its deadline")]
    TimedOut,
}

/// An external bibliographic search integration. Implementations are opaque
/// and independently fallible; callers never depend on one source to cover
/// for another.
pub trait LiteratureSource: Send + Sync {
    fn search<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<ResearchRecord>, SourceError>>;
}
