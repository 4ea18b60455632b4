use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State of the most recent API call made by a session.
///
/// With exit-on-error disabled, `None`/`false` return values are ambiguous
/// between "not found" and "request failed"; this is where callers look.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LastResponse {
    /// HTTP status code, `None` before the first call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,

    /// Decoded body of a successful JSON call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,

    /// Raw body of a failed call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LastResponse {
    /// Whether the status code is in the 2xx class
    pub fn is_valid(&self) -> bool {
        matches!(self.code, Some(200..=299))
    }

    /// Turn a failed call into `ValenceError::Http`, for callers that prefer
    /// `?` over inspecting the status
    pub fn error_for_status(&self) -> Result<(), crate::error::ValenceError> {
        match self.code {
            Some(code) if !self.is_valid() => Err(crate::error::ValenceError::http(
                code,
                self.error.clone().unwrap_or_default(),
            )),
            _ => Ok(()),
        }
    }

    /// Get a value from the body by a slash-separated path.
    /// For example, "Items/0/Identifier" walks into the first item of "Items".
    pub fn get(&self, path: &str) -> Option<&Value> {
        value_at(self.body.as_ref()?, path)
    }

    /// Get a string value from the body by a slash-separated path
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(|v| v.as_str().map(|s| s.to_string()))
    }

    /// Apply unmarshals the body into the provided type
    pub fn apply<T>(&self) -> Result<T, crate::error::ValenceError>
    where
        T: serde::de::DeserializeOwned,
    {
        match &self.body {
            Some(body) => serde_json::from_value(body.clone()).map_err(|e| e.into()),
            None => serde_json::from_value(Value::Null).map_err(|e| e.into()),
        }
    }
}

/// Walk a JSON value by a slash-separated path; numeric parts index arrays.
pub(crate) fn value_at<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;

    for part in path.split('/').filter(|s| !s.is_empty()) {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(arr) => {
                let index: usize = part.parse().ok()?;
                arr.get(index)?
            }
            _ => return None,
        };
    }

    Some(current)
}

/// Decode a response body; empty or non-JSON bodies decode to `None`.
pub(crate) fn decode_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str(body).ok()
}
