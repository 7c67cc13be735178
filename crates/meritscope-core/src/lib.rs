//! Admission-chance scoring, career matching, and alias search for meritscope.
//!
//! This crate defines the reference data model and the pure scoring functions
//! that the meritscope CLI (and any other front end) builds on.

pub mod admission;
pub mod alias;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod quiz;
pub mod report;
pub mod statistics;

pub use admission::{score_catalog, score_program, score_programs};
pub use alias::AliasTable;
pub use error::ScoringError;
pub use quiz::score_careers;
