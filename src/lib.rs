//! # tabscope - quick descriptive analysis of tabular files
//!
//! tabscope loads a CSV or JSON file into a polars `DataFrame` and answers
//! the usual first questions about it: summary statistics for the numeric
//! columns, value counts for a categorical one, a handful of charts, and a
//! JSON report that can be handed to someone else.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tabscope::analyser::Analyzer;
//!
//! # fn main() -> tabscope::error::Result<()> {
//! let analyzer = Analyzer::new("sample_data.csv")?;
//! let stats = analyzer.generate_summary_statistics()?;
//! println!("{} rows", stats.total_rows);
//!
//! for (column, s) in &stats.column_stats {
//!     println!("{column}: mean {:.2}, median {:.2}", s.mean, s.median);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`analyser`]: the [`Analyzer`](analyser::Analyzer) facade
//!   - [`analyser::io`]: extension-based reader selection
//!   - [`analyser::stats`]: per-column descriptive statistics
//!   - [`analyser::frequency`]: value counts
//!   - [`analyser::plots`]: figures and the caller-owned drawing context
//!   - [`analyser::report`]: the JSON report
//! - [`config`]: tunable settings
//! - [`error`]: error types
//! - [`logging`]: subscriber setup for the binary
//!
//! ## Charts
//!
//! Figures are built into a [`DrawingContext`](analyser::DrawingContext)
//! that the caller creates and passes in. There is no process-wide
//! "current figure"; separate contexts never interfere.

#![warn(clippy::all, rust_2018_idioms)]

pub mod analyser;
pub mod config;
pub mod error;
pub mod logging;
