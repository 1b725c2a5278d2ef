//! # Aggregate Views
//!
//! Per-sector statistics and the run summary computed over a derived table.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files or
//!   configuration and depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** `AnalyticsEngine` holds no state. Absent values are
//!   skipped by every aggregate, so an aggregate is itself absent only when no row
//!   contributes to it.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: sector grouping and the summary.
//! - `SectorStats`, `Summary`: the aggregate rows.
//! - `mean`, `median`: the Decimal helpers behind them.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, mean, median};
pub use report::{SectorStats, Summary};
