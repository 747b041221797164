//! Report module
//!
//! Console summary and chart output for a finished ranking.

pub mod chart;
pub mod summary;

pub use chart::render_ranking_chart;
pub use summary::{log_summary, summary_lines};
