//! Multi-source bibliographic research pipeline behind the advice chat.
//!
//! A query fans out to the PubMed and DOAJ adapters plus a hand-curated local
//! library, then the merged candidates are deduplicated, relevance-filtered,
//! and capped. Adapter failures degrade to empty contributions; an empty
//! final set degrades to a templated advisory message.

pub mod adapters;
pub mod aggregator;
pub mod curated;
pub mod doaj;
pub mod domain;
pub mod followups;
pub mod pubmed;
pub mod relevance;
pub mod router;

pub use adapters::{LiteratureSource, SourceError};
pub use aggregator::{AggregatorLimits, ResearchAggregator};
pub use curated::CuratedLibrary;
pub use doaj::DoajSource;
pub use domain::{ResearchRecord, SearchOutcome};
pub use followups::{follow_up_questions, is_personal_question};
pub use pubmed::PubMedSource;
pub use relevance::RelevanceFilter;
pub use router::research_router;
