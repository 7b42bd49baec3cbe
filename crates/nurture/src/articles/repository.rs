use super::domain::{Article, ArticleStatus};

/// Storage abstraction so the service module can be exercised in isolation.
/// The production implementation is an owned in-memory map with process
/// lifetime; nothing about this trait promises durability.
pub trait ArticleRepository: Send + Sync {
    fn insert(&self, article: Article) -> Result<Article, RepositoryError>;
    fn update(&self, article: Article) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &str) -> Result<Option<Article>, RepositoryError>;
    fn by_status(&self, status: ArticleStatus) -> Result<Vec<Article>, RepositoryError>;
    fn all(&self) -> Result<Vec<Article>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("article already exists")]
    Conflict,
    #[error("article not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
