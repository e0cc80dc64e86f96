use serde_json::{Map, Value};
use thiserror::Error;

/// One transaction as returned by the explorer, kept as an untyped field map.
///
/// Field order follows the response body (`serde_json` is built with `preserve_order`).
pub type Record = Map<String, Value>;

/// Decoded body of `GET /api/v2/transactions`
#[derive(Debug, Clone, Default)]
pub struct TransactionsResponse {
    pub items: Vec<Record>,
    /// Cursor for the next page, present when the explorer has more results
    pub next_page_params: Option<Value>,
}

impl TransactionsResponse {
    pub const ITEMS_KEY: &'static str = "items";
    pub const NEXT_PAGE_KEY: &'static str = "next_page_params";

    /// Parse a raw response body.
    ///
    /// The status code is not consulted here, so an error page surfaces as
    /// `Parse` (non-JSON body) or `MissingKey` (JSON error object).
    pub fn from_body(body: &str) -> Result<Self, ApiError> {
        let payload: Value = serde_json::from_str(body).map_err(ApiError::Parse)?;
        Self::from_value(payload)
    }

    /// Extract the record list from an already decoded payload
    pub fn from_value(payload: Value) -> Result<Self, ApiError> {
        let mut object = match payload {
            Value::Object(object) => object,
            other => return Err(ApiError::UnexpectedPayload(json_type_name(&other))),
        };

        let items = object
            .remove(Self::ITEMS_KEY)
            .ok_or_else(|| ApiError::MissingKey(Self::ITEMS_KEY.to_string()))?;

        let items = match items {
            Value::Array(items) => items,
            other => {
                return Err(ApiError::MalformedRecords(format!(
                    "`{}` is {}, expected an array",
                    Self::ITEMS_KEY,
                    json_type_name(&other)
                )))
            }
        };

        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(ApiError::MalformedRecords(format!(
                    "record {} is {}, expected an object",
                    index,
                    json_type_name(&other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let next_page_params = object
            .remove(Self::NEXT_PAGE_KEY)
            .filter(|params| !params.is_null());

        Ok(Self {
            items,
            next_page_params,
        })
    }
}

/// Errors raised while fetching or decoding explorer responses
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, TLS failure and the like
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("Response body is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Response is {0}, expected a JSON object")]
    UnexpectedPayload(&'static str),
    #[error("Response is missing key `{0}`")]
    MissingKey(String),
    #[error("Malformed record list: {0}")]
    MalformedRecords(String),
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
