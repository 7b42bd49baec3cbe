use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{Article, ArticleDraft, ArticleReference, ArticleStatus};
use super::repository::{ArticleRepository, RepositoryError};

static ARTICLE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_article_id() -> String {
    let id = ARTICLE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("article-{id:06}")
}

/// Service composing the repository with the editorial status workflow.
pub struct ArticleService<R> {
    repository: Arc<R>,
}

impl<R> ArticleService<R>
where
    R: ArticleRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Store a new draft, assigning the article and reference ids and
    /// stamping timestamps.
    pub fn create(&self, draft: ArticleDraft) -> Result<Article, ArticleServiceError> {
        let id = next_article_id();
        let now = Utc::now();

        let references = draft
            .references
            .into_iter()
            .enumerate()
            .map(|(index, reference)| ArticleReference {
                id: format!("{id}-ref-{:02}", index + 1),
                article_id: id.clone(),
                title: reference.title,
                url: reference.url,
                quote: reference.quote,
                domain: reference.domain,
                published_date: reference.published_date,
            })
            .collect();

        let article = Article {
            id,
            title: draft.title,
            content: draft.content,
            summary: draft.summary,
            status: ArticleStatus::Draft,
            tags: draft.tags,
            category: draft.category,
            publish_date: draft.publish_date.unwrap_or(now),
            created_at: now,
            updated_at: now,
            references,
        };

        let stored = self.repository.insert(article)?;
        Ok(stored)
    }

    pub fn get(&self, id: &str) -> Result<Article, ArticleServiceError> {
        let article = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(article)
    }

    /// Articles in a status, newest first, capped at `limit`.
    pub fn list(
        &self,
        status: ArticleStatus,
        limit: usize,
    ) -> Result<Vec<Article>, ArticleServiceError> {
        let mut articles = self.repository.by_status(status)?;
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        articles.truncate(limit);
        Ok(articles)
    }

    /// Move an article through the draft/featured/archived workflow.
    pub fn set_status(
        &self,
        id: &str,
        status: ArticleStatus,
    ) -> Result<Article, ArticleServiceError> {
        let mut article = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        article.status = status;
        article.updated_at = Utc::now();
        self.repository.update(article.clone())?;
        Ok(article)
    }

    /// Archive the oldest featured articles; returns how many were moved.
    /// Used by the content rotation job when fresh articles are promoted.
    pub fn archive_oldest_featured(&self, count: usize) -> Result<usize, ArticleServiceError> {
        let mut featured = self.repository.by_status(ArticleStatus::Featured)?;
        featured.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let mut archived = 0;
        for article in featured.into_iter().take(count) {
            self.set_status(&article.id, ArticleStatus::Archived)?;
            archived += 1;
        }
        Ok(archived)
    }

    /// Article counts per status, for the admin dashboard.
    pub fn stats(&self) -> Result<BTreeMap<&'static str, usize>, ArticleServiceError> {
        let articles = self.repository.all()?;
        let mut stats = BTreeMap::new();
        for status in ArticleStatus::ordered() {
            let count = articles
                .iter()
                .filter(|article| article.status == status)
                .count();
            stats.insert(status.label(), count);
        }
        Ok(stats)
    }
}

/// Error raised by the article service.
#[derive(Debug, thiserror::Error)]
pub enum ArticleServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapRepository {
        articles: Mutex<HashMap<String, Article>>,
    }

    impl ArticleRepository for MapRepository {
        fn insert(&self, article: Article) -> Result<Article, RepositoryError> {
            let mut guard = self.articles.lock().expect("repository mutex poisoned");
            if guard.contains_key(&article.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(article.id.clone(), article.clone());
            Ok(article)
        }

        fn update(&self, article: Article) -> Result<(), RepositoryError> {
            let mut guard = self.articles.lock().expect("repository mutex poisoned");
            if guard.contains_key(&article.id) {
                guard.insert(article.id.clone(), article);
                Ok(())
            } else {
                Err(RepositoryError::NotFound)
            }
        }

        fn fetch(&self, id: &str) -> Result<Option<Article>, RepositoryError> {
            let guard = self.articles.lock().expect("repository mutex poisoned");
            Ok(guard.get(id).cloned())
        }

        fn by_status(&self, status: ArticleStatus) -> Result<Vec<Article>, RepositoryError> {
            let guard = self.articles.lock().expect("repository mutex poisoned");
            Ok(guard
                .values()
                .filter(|article| article.status == status)
                .cloned()
                .collect())
        }

        fn all(&self) -> Result<Vec<Article>, RepositoryError> {
            let guard = self.articles.lock().expect("repository mutex poisoned");
            Ok(guard.values().cloned().collect())
        }
    }

    fn draft(title: &str) -> ArticleDraft {
        ArticleDraft {
            title: title.to_string(),
            content: format!("# {title}\n\nBody."),
            summary: format!("{title} summary."),
            tags: vec!["parenting".to_string()],
            category: "Parenting Strategies".to_string(),
            publish_date: None,
            references: vec![super::super::domain::ReferenceDraft {
                title: "Cited guideline".to_string(),
                url: "https://pediatrics.org/guidelines".to_string(),
                quote: "A relevant quote.".to_string(),
                domain: "pediatrics.org".to_string(),
                published_date: None,
            }],
        }
    }

    fn service() -> ArticleService<MapRepository> {
        ArticleService::new(Arc::new(MapRepository::default()))
    }

    #[test]
    fn create_assigns_ids_and_starts_in_draft() {
        let service = service();
        let stored = service.create(draft("Milestones guide")).expect("created");

        assert!(stored.id.starts_with("article-"));
        assert_eq!(stored.status, ArticleStatus::Draft);
        assert_eq!(stored.references.len(), 1);
        assert_eq!(stored.references[0].article_id, stored.id);
        assert!(stored.references[0].id.ends_with("-ref-01"));
    }

    #[test]
    fn status_workflow_moves_draft_to_featured_to_archived() {
        let service = service();
        let stored = service.create(draft("Discipline basics")).expect("created");

        let featured = service
            .set_status(&stored.id, ArticleStatus::Featured)
            .expect("featured");
        assert_eq!(featured.status, ArticleStatus::Featured);

        let archived = service
            .set_status(&stored.id, ArticleStatus::Archived)
            .expect("archived");
        assert_eq!(archived.status, ArticleStatus::Archived);
        assert!(archived.updated_at >= stored.updated_at);
    }

    #[test]
    fn unknown_article_is_not_found() {
        let service = service();
        let error = service.get("article-404").expect_err("missing");
        assert!(matches!(
            error,
            ArticleServiceError::Repository(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn list_returns_newest_first_up_to_limit() {
        let service = service();
        let first = service.create(draft("Oldest")).expect("created");
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = service.create(draft("Middle")).expect("created");
        std::thread::sleep(std::time::Duration::from_millis(5));
        let third = service.create(draft("Newest")).expect("created");

        for article in [&first, &second, &third] {
            service
                .set_status(&article.id, ArticleStatus::Featured)
                .expect("featured");
        }

        let listed = service.list(ArticleStatus::Featured, 2).expect("listed");
        assert_eq!(listed.len(), 2);
        assert!(listed[0].created_at >= listed[1].created_at);
    }

    #[test]
    fn rotation_archives_the_oldest_featured_articles() {
        let service = service();
        let ids: Vec<String> = ["A", "B", "C"]
            .iter()
            .map(|title| {
                std::thread::sleep(std::time::Duration::from_millis(5));
                let stored = service.create(draft(title)).expect("created");
                service
                    .set_status(&stored.id, ArticleStatus::Featured)
                    .expect("featured");
                stored.id
            })
            .collect();

        let archived = service.archive_oldest_featured(2).expect("rotated");
        assert_eq!(archived, 2);

        let still_featured = service.list(ArticleStatus::Featured, 10).expect("listed");
        assert_eq!(still_featured.len(), 1);
        assert_eq!(still_featured[0].id, ids[2]);

        let stats = service.stats().expect("stats");
        assert_eq!(stats["Archived"], 2);
        assert_eq!(stats["Featured"], 1);
        assert_eq!(stats["Draft"], 0);
    }
}
