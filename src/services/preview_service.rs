use chrono::Utc;
use tracing::{debug, info};

use crate::api::blockscout::{BlockscoutClient, Record};
use crate::config::Config;
use crate::models::PreviewResult;
use crate::services::analysis_service;
use crate::utils::{EtlError, Table};

/// Rows shown in the preview
pub const PREVIEW_ROWS: usize = 5;

/// Fetch the first page of validated transactions
pub async fn fetch_records(client: &BlockscoutClient) -> Result<Vec<Record>, EtlError> {
    let response = client.get_validated_transactions().await?;
    info!("Fetched {} transactions from {}", response.items.len(), client.url());

    if let Some(params) = &response.next_page_params {
        debug!("More results available (not fetched), next page params: {}", params);
    }

    Ok(response.items)
}

/// Build the full table and keep its first `rows` rows
pub fn build_preview(records: &[Record], rows: usize) -> PreviewResult {
    let table = Table::from_records(records);

    PreviewResult {
        head: table.head(rows),
        total_rows: table.len(),
        total_columns: table.headers().len(),
    }
}

/// Run the whole pipeline once and return what should go to stdout
pub async fn run(client: &BlockscoutClient, config: &Config) -> Result<String, EtlError> {
    let records = fetch_records(client).await?;

    let preview = build_preview(&records, PREVIEW_ROWS);
    debug!(
        "Previewing {} of {} rows across {} columns",
        preview.head.len(),
        preview.total_rows,
        preview.total_columns
    );

    if preview.head.is_empty() {
        info!("Explorer returned no transactions");
    }

    let mut output = preview.head.render(&config.render);

    if config.analyze {
        let analysis = analysis_service::analyze(&records, Utc::now());
        output.push_str("\n\n");
        output.push_str(&analysis_service::render_analysis(&analysis));
    }

    Ok(output)
}
