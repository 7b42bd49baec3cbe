//! Editorial article store with a draft/featured/archived status workflow.
//!
//! Storage is a repository trait over an owned in-memory collection: a cache
//! with process lifetime, no eviction, and no backing store. Durability needs
//! a real persistence layer; nothing here pretends to be a database.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Article, ArticleDraft, ArticleReference, ArticleStatus, ReferenceDraft};
pub use repository::{ArticleRepository, RepositoryError};
pub use router::article_router;
pub use service::{ArticleService, ArticleServiceError};
