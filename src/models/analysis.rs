//! Transaction analysis models

use std::fmt;

/// How serious a detected anomaly is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    HighFrequency,
    UnusualValues,
    GasAnomaly,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::HighFrequency => "high_frequency",
            AnomalyKind::UnusualValues => "unusual_values",
            AnomalyKind::GasAnomaly => "gas_anomaly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    pub description: &'static str,
    pub severity: Severity,
}

/// Result struct for analysis over one page of transactions
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub total_transactions: usize,
    pub total_volume: f64,
    pub average_value: f64,
    pub anomalies: Vec<Anomaly>,
}
