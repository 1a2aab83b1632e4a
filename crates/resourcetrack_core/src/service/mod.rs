//! Dashboard services and derived metrics.
//!
//! # Responsibility
//! - Compute derived figures from store data (`metrics`, `timeline`).
//! - Assemble section views for UI and CLI callers (`dashboard`).

pub mod dashboard;
pub mod metrics;
pub mod timeline;
