//! Self-assessment questionnaires and their scoring rules.
//!
//! Definitions are static configuration built once by [`AssessmentCatalog`];
//! scoring is a pure function over a definition and a completed answer set.

pub mod catalog;
pub mod domain;
pub mod router;
pub mod scoring;

pub use catalog::AssessmentCatalog;
pub use domain::{
    AnswerOption, AnswerSet, AssessmentDefinition, AssessmentResult, Question, ScoringRange,
    Subscale, SubscaleDefinition, SubscaleScores,
};
pub use router::assessment_router;
pub use scoring::{score, ScoringError};
