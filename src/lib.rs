// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod article;
pub mod config;
pub mod insight;

// Rule-based insight engine
pub mod analyze;

// Surrounding collaborators: acquisition, persistence, delivery, orchestration
pub mod brief;
pub mod ingest;
pub mod notify;
pub mod scheduler;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{analyze_all, AnalyzerParams, DomainAnalyzer, InsightAnalyzer};
pub use crate::article::Article;
pub use crate::insight::{Domain, Insight, InsightData, InsightStatus, Priority};
