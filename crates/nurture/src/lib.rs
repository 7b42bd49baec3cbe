//! Core library for the nurture parenting guidance platform.
//!
//! Three feature modules make up the domain: [`assessments`] (self-assessment
//! questionnaires scored server-side), [`research`] (multi-source bibliographic
//! search with relevance filtering), and [`articles`] (the in-memory article
//! store behind the editorial workflow). Configuration, telemetry, and the
//! top-level error type live alongside them.

pub mod articles;
pub mod assessments;
pub mod config;
pub mod error;
pub mod research;
pub mod telemetry;
