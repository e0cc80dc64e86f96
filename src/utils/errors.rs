use thiserror::Error;

use crate::api::blockscout::ApiError;
use crate::config::ConfigError;

/// Top-level failure of a pipeline run
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Explorer error: {0}")]
    Api(#[from] ApiError),
}
