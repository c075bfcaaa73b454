//! Anamnesis: a patient intake questionnaire engine.
//!
//! The engine owns the decision logic of the intake flow: deriving a
//! patient context from symptoms and health metrics, selecting contextual
//! follow-up questions through a declarative rule table, sanitizing
//! AI-generated question candidates against the static bank, resolving
//! conditional question visibility, and assembling deterministic summaries
//! and chart-ready report data. The surrounding UI, chart rendering, and
//! HTTP plumbing live elsewhere and consume this crate as plain function
//! calls.

pub mod analysis;
pub mod bank;
pub mod charts;
pub mod config;
pub mod context;
pub mod dedup;
pub mod error;
pub mod models;
pub mod oracle;
pub mod report;
pub mod rules;
pub mod session;
pub mod summary;
pub mod taxonomy;
pub mod visibility;

use tracing_subscriber::EnvFilter;

/// Initialize tracing with `RUST_LOG` or the crate default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
