use serde::{Deserialize, Serialize};

/// A bibliographic record normalized from any source. Provenance is not
/// retained beyond whatever prefix the source baked into `id`; after
/// normalization all records are treated uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchRecord {
    /// Source-qualified identifier (PMID, DOAJ id, curated key). Dedup key.
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub authors: String,
    pub journal: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    pub url: String,
}

impl ResearchRecord {
    /// Lowercased title+abstract haystack the relevance filter matches on.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.abstract_text).to_lowercase()
    }
}

/// Outcome of a research search: a ranked, capped evidence list, or the
/// designed advisory degrade path when nothing relevant survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Results(Vec<ResearchRecord>),
    Advisory(String),
}

impl SearchOutcome {
    pub fn records(&self) -> &[ResearchRecord] {
        match self {
            SearchOutcome::Results(records) => records,
            SearchOutcome::Advisory(_) => &[],
        }
    }

    pub fn is_advisory(&self) -> bool {
        matches!(self, SearchOutcome::Advisory(_))
    }
}
