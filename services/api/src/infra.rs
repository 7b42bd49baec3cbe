use chrono::{NaiveDate, TimeZone, Utc};
use futures::future::BoxFuture;
use metrics_exporter_prometheus::PrometheusHandle;
use nurture::articles::{
    Article, ArticleReference, ArticleRepository, ArticleStatus, RepositoryError,
};
use nurture::research::{LiteratureSource, ResearchRecord, SourceError};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryArticleRepository {
    articles: Arc<Mutex<HashMap<String, Article>>>,
}

impl ArticleRepository for InMemoryArticleRepository {
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

/// A literature source that always returns nothing. Stands in for the remote
/// adapters in offline demos and router tests, leaving the curated library as
/// the only contributor.
pub(crate) struct OfflineSource;

impl LiteratureSource for OfflineSource {
    fn search<'a>(
        &'a self,
        _query: &'a str,
        _limit: usize,
    ) -> BoxFuture<'a, Result<Vec<ResearchRecord>, SourceError>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

/// Install the starter editorial content so a fresh process has something to
/// serve. Storage is process-lifetime only; every restart reseeds.
pub(crate) fn seed_sample_articles(repository: &InMemoryArticleRepository) {
    let mut seeded = 0;
    for article in sample_articles() {
        if repository.insert(article).is_ok() {
            seeded += 1;
        }
    }
    info!(seeded, "sample articles installed");
}

fn seed_timestamp(year: i32, month: u32, day: u32) -> chrono::DateTime<Utc> {
    match Utc.with_ymd_and_hms(year, month, day, 0, 0, 0) {
        chrono::LocalResult::Single(timestamp) => timestamp,
        _ => Utc::now(),
    }
}

fn sample_articles() -> Vec<Article> {
    let milestones_created = seed_timestamp(2024, 1, 15);
    let discipline_created = seed_timestamp(2024, 1, 10);

    vec![
        Article {
            id: "sample-000001".to_string(),
            title: "Understanding Child Development Milestones: A Parent's Guide".to_string(),
            content: r#"# Understanding Child Development Milestones: A Parent's Guide

Child development milestones are key indicators of your child's growth. Understanding them helps parents support learning and spot potential concerns early.

## What Are Developmental Milestones?

Skills or abilities most children can do by a certain age, across physical, cognitive, social, and emotional areas.

## Key Milestones by Age

- **0-12 months**: lifts head, rolls over, recognizes familiar faces, smiles at people.
- **1-2 years**: walks independently, says 10-20 words, plays alongside other children.
- **2-3 years**: runs and jumps, speaks in 2-3 word sentences, engages in pretend play.

## Supporting Your Child's Development

1. Provide a safe environment for exploration
2. Engage in interactive play and conversation
3. Read together daily to support language development
4. Encourage independence while providing support
5. Celebrate achievements to build confidence

## When to Seek Help

If your child consistently misses milestones or shows regression, consult your pediatrician or a child development specialist.

Every child develops at their own pace, but understanding typical milestones helps parents provide appropriate support."#
                .to_string(),
            summary: "A comprehensive guide to understanding child development milestones and how parents can support their child's growth and development.".to_string(),
            status: ArticleStatus::Featured,
            tags: vec![
                "child development".to_string(),
                "milestones".to_string(),
                "parenting".to_string(),
                "growth".to_string(),
            ],
            category: "Child Development".to_string(),
            publish_date: milestones_created,
            created_at: milestones_created,
            updated_at: milestones_created,
            references: vec![ArticleReference {
                id: "sample-000001-ref-01".to_string(),
                article_id: "sample-000001".to_string(),
                title: "Developmental Milestones in Early Childhood".to_string(),
                url: "https://pediatrics.org/guidelines/developmental-milestones".to_string(),
                quote: "Developmental milestones are key indicators of healthy child development and should be monitored regularly.".to_string(),
                domain: "pediatrics.org".to_string(),
                published_date: NaiveDate::from_ymd_opt(2023, 12, 1),
            }],
        },
        Article {
            id: "sample-000002".to_string(),
            title: "Positive Discipline Strategies for Toddlers".to_string(),
            content: r#"# Positive Discipline Strategies for Toddlers

Disciplining toddlers is challenging, but positive discipline strategies guide behavior while maintaining a strong parent-child relationship.

## Understanding Toddler Behavior

Toddlers are learning to express themselves and test boundaries. Behavior is often driven by curiosity, frustration, or the need for attention.

## Positive Discipline Techniques

1. **Set clear expectations** - simple language, consistent rules, calm consequences.
2. **Redirect and distract** - guide your child to appropriate activities.
3. **Time-in instead of time-out** - stay with your child and help them process emotions.
4. **Natural consequences** - let children experience the results of their actions safely.

## Building Emotional Intelligence

Name emotions as they occur, validate feelings, and teach appropriate ways to express frustration.

Consistent application of these strategies helps children understand expectations and feel secure. Positive discipline focuses on teaching rather than punishing."#
                .to_string(),
            summary: "Learn effective positive discipline strategies for toddlers that promote good behavior while strengthening the parent-child relationship.".to_string(),
            status: ArticleStatus::Featured,
            tags: vec![
                "discipline".to_string(),
                "toddlers".to_string(),
                "positive parenting".to_string(),
                "behavior".to_string(),
            ],
            category: "Parenting Strategies".to_string(),
            publish_date: discipline_created,
            created_at: discipline_created,
            updated_at: discipline_created,
            references: vec![ArticleReference {
                id: "sample-000002-ref-01".to_string(),
                article_id: "sample-000002".to_string(),
                title: "Positive Discipline in Early Childhood".to_string(),
                url: "https://apa.org/psychology/positive-discipline".to_string(),
                quote: "Positive discipline strategies promote healthy child development and strengthen parent-child relationships.".to_string(),
                domain: "apa.org".to_string(),
                published_date: NaiveDate::from_ymd_opt(2023, 11, 15),
            }],
        },
    ]
}
