use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    Draft,
    Featured,
    Archived,
}

impl ArticleStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Draft, Self::Featured, Self::Archived]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Featured => "Featured",
            Self::Archived => "Archived",
        }
    }
}

/// A cited source attached to an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleReference {
    pub id: String,
    pub article_id: String,
    pub title: String,
    pub url: String,
    pub quote: String,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub status: ArticleStatus,
    pub tags: Vec<String>,
    pub category: String,
    pub publish_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub references: Vec<ArticleReference>,
}

/// Reference payload as submitted; ids are assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDraft {
    pub title: String,
    pub url: String,
    pub quote: String,
    pub domain: String,
    #[serde(default)]
    pub published_date: Option<NaiveDate>,
}

/// Article payload as submitted; id, status, and timestamps are assigned by
/// the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub publish_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub references: Vec<ReferenceDraft>,
}
