use std::process::ExitCode;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod utils;

use api::blockscout::BlockscoutClient;
use config::Config;
use services::preview_service;
use utils::EtlError;

async fn run() -> Result<String, EtlError> {
    let config = Config::from_env()?;
    debug!("Loaded config: {:?}", config);

    let client = BlockscoutClient::new(BlockscoutClient::DEFAULT_URL);
    preview_service::run(&client, &config).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Logs go to stderr, stdout carries only the preview
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("alfajores_etl=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!("Fetching validated transactions...");

    report(run().await)
}

/// Print a successful preview, or log the failure, and pick the exit code
fn report(result: Result<String, EtlError>) -> ExitCode {
    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::blockscout::ApiError;

    #[test]
    fn test_failure_exit_code() {
        let code = report(Err(EtlError::Api(ApiError::MissingKey("items".to_string()))));
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::FAILURE));
    }

    #[test]
    fn test_success_exit_code() {
        let code = report(Ok("Empty table\nColumns: []\nIndex: []".to_string()));
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::SUCCESS));
    }
}
