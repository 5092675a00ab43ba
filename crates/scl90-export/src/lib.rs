//! scl90-export
//!
//! Charts, PDF report, and DOCX/Markdown summaries for scored evaluations.

pub mod chart;
pub mod docx;
pub mod error;
mod metrics;
pub mod pdf;
pub mod render;
pub mod report;
pub mod styles;
