//! Data models for pipeline results
//!
//! Each model represents the output of a service operation.

pub mod analysis;
pub mod preview;

pub use analysis::{AnalysisResult, Anomaly, AnomalyKind, Severity};
pub use preview::PreviewResult;
