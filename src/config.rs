use std::str::FromStr;

use thiserror::Error;

use crate::utils::RenderOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Display settings, all optional; unset variables keep the built-in defaults.
///
/// The explorer endpoint and the preview length are fixed and not configurable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub render: RenderOptions,
    pub analyze: bool,
}

impl Config {
    /// Read settings from the process environment (after `.env` has been loaded)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(columns) = parse_var(&lookup, "PREVIEW_MAX_COLUMNS")? {
            config.render.max_columns = columns;
        }
        if let Some(width) = parse_var(&lookup, "PREVIEW_MAX_COLWIDTH")? {
            config.render.max_colwidth = width;
        }
        if let Some(raw) = lookup("ETL_ANALYZE") {
            config.analyze = parse_flag("ETL_ANALYZE", &raw)?;
        }

        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => {
            let parsed = raw.trim().parse::<T>();
            parsed.map(Some).map_err(|e| ConfigError::Invalid {
                key,
                value: raw,
                reason: e.to_string(),
            })
        }
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected true/false".to_string(),
        }),
    }
}
