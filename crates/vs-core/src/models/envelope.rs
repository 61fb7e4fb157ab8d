use crate::{CoreError, Result as CoreErrorResult};

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_ENVELOPE_MESSAGE: &str = "SUCCESS";

fn default_message() -> String {
    String::from(DEFAULT_ENVELOPE_MESSAGE)
}

/// `{data, message}` wrapper used by every backend response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default = "default_message")]
    pub message: String,
}

impl<T> Envelope<T> {
    /// Unwraps `data`, treating its absence as an incomplete response.
    #[track_caller]
    pub fn into_data(self) -> CoreErrorResult<T> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(CoreError::incomplete_response(format!(
                "response carried no data (message: {})",
                self.message
            ))),
        }
    }
}

/// Body of a non-2xx response.
///
/// `detail` is a string for handled errors and a list of `{loc, msg, type}`
/// entries for request validation failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// The most specific human-readable message in the body, if any.
    pub fn message(&self) -> Option<String> {
        let from_detail = match &self.detail {
            Some(Value::String(text)) => Some(text.clone()),
            Some(Value::Array(entries)) => entries.iter().find_map(|entry| match entry {
                Value::String(text) => Some(text.clone()),
                Value::Object(fields) => fields
                    .get("msg")
                    .and_then(Value::as_str)
                    .map(String::from),
                _ => None,
            }),
            Some(Value::Object(fields)) => fields
                .get("msg")
                .and_then(Value::as_str)
                .map(String::from),
            _ => None,
        };

        from_detail
            .or_else(|| self.message.clone())
            .filter(|text| !text.trim().is_empty())
    }
}
