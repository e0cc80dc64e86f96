use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::api::blockscout::Record;
use crate::models::{AnalysisResult, Anomaly, AnomalyKind, Severity};
use crate::utils::{RenderOptions, Table};

const RECENT_WINDOW_SECS: i64 = 24 * 60 * 60;
const HIGH_FREQUENCY_THRESHOLD: usize = 100;
const OUTLIER_STD_DEVS: f64 = 3.0;
const HIGH_GAS_MULTIPLIER: f64 = 2.0;
const HIGH_GAS_THRESHOLD: usize = 5;

/// The few record fields the analysis looks at. Unparseable values read as 0 / absent.
#[derive(Debug, Default, Deserialize)]
struct TransferFields {
    #[serde(default, deserialize_with = "lenient_number")]
    value: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    gas_price: f64,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    timestamp: Option<DateTime<Utc>>,
}

impl TransferFields {
    fn from_record(record: &Record) -> Self {
        serde_json::from_value(Value::Object(record.clone())).unwrap_or_default()
    }
}

/// Explorer amounts are decimal strings (wei), but plain numbers are accepted too
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// RFC 3339 strings, or unix seconds
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|ts| ts.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    })
}

/// Compute totals and flag anomalies over one page of transactions.
///
/// `now` anchors the recent-activity window.
pub fn analyze(records: &[Record], now: DateTime<Utc>) -> AnalysisResult {
    let transfers: Vec<TransferFields> = records.iter().map(TransferFields::from_record).collect();
    let total_transactions = transfers.len();

    if transfers.is_empty() {
        return AnalysisResult {
            total_transactions: 0,
            total_volume: 0.0,
            average_value: 0.0,
            anomalies: Vec::new(),
        };
    }

    let total_volume: f64 = transfers.iter().map(|tx| tx.value).sum();
    let average_value = total_volume / total_transactions as f64;
    let anomalies = detect_anomalies(&transfers, average_value, now);

    debug!(
        "Analyzed {} transactions, {} anomalies",
        total_transactions,
        anomalies.len()
    );

    AnalysisResult {
        total_transactions,
        total_volume,
        average_value,
        anomalies,
    }
}

fn detect_anomalies(
    transfers: &[TransferFields],
    average_value: f64,
    now: DateTime<Utc>,
) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();
    let count = transfers.len() as f64;

    // 1. Burst of activity inside the recent window
    let recent = transfers
        .iter()
        .filter_map(|tx| tx.timestamp)
        .filter(|ts| now.signed_duration_since(*ts).num_seconds() < RECENT_WINDOW_SECS)
        .count();

    if recent > HIGH_FREQUENCY_THRESHOLD {
        anomalies.push(Anomaly {
            kind: AnomalyKind::HighFrequency,
            description: "Unusually high number of transactions in the last 24 hours",
            severity: Severity::High,
        });
    }

    // 2. Values far from the mean
    let variance = transfers
        .iter()
        .map(|tx| (tx.value - average_value).powi(2))
        .sum::<f64>()
        / count;
    let std_dev = variance.sqrt();

    if transfers
        .iter()
        .any(|tx| (tx.value - average_value).abs() > OUTLIER_STD_DEVS * std_dev)
    {
        anomalies.push(Anomaly {
            kind: AnomalyKind::UnusualValues,
            description: "Detected transactions with unusually high or low values",
            severity: Severity::Medium,
        });
    }

    // 3. Repeated overpaying on gas
    let average_gas_price = transfers.iter().map(|tx| tx.gas_price).sum::<f64>() / count;
    let high_gas = transfers
        .iter()
        .filter(|tx| tx.gas_price > average_gas_price * HIGH_GAS_MULTIPLIER)
        .count();

    if high_gas > HIGH_GAS_THRESHOLD {
        anomalies.push(Anomaly {
            kind: AnomalyKind::GasAnomaly,
            description: "Multiple transactions with unusually high gas prices",
            severity: Severity::Medium,
        });
    }

    anomalies
}

/// Render the analysis as two small tables: totals, then anomalies
pub fn render_analysis(result: &AnalysisResult) -> String {
    let options = RenderOptions {
        max_columns: 0,
        max_colwidth: 0,
        show_index: false,
    };

    let total_transactions = result.total_transactions.to_string();
    let total_volume = result.total_volume.to_string();
    let average_value = result.average_value.to_string();

    let mut summary = Table::new(vec!["metric", "value"]);
    summary.add_row(vec!["total_transactions", total_transactions.as_str()]);
    summary.add_row(vec!["total_volume", total_volume.as_str()]);
    summary.add_row(vec!["average_value", average_value.as_str()]);

    let mut output = summary.render(&options);
    output.push_str("\n\n");

    if result.anomalies.is_empty() {
        output.push_str("No anomalies detected");
        return output;
    }

    let severities: Vec<String> = result.anomalies.iter().map(|a| a.severity.to_string()).collect();
    let mut anomalies = Table::new(vec!["type", "severity", "description"]);
    for (anomaly, severity) in result.anomalies.iter().zip(&severities) {
        anomalies.add_row(vec![anomaly.kind.as_str(), severity.as_str(), anomaly.description]);
    }
    output.push_str(&anomalies.render(&options));
    output
}
