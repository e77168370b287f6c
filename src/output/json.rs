//! JSON output formatting

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Envelope for JSON output: the data plus generation metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a, T: ?Sized> {
    pub data: &'a T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// When the output was generated (RFC 3339, UTC)
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Number of items, for list output only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<'a, T: ?Sized> JsonOutput<'a, T> {
    fn new(data: &'a T, count: Option<usize>) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                version: env!("CARGO_PKG_VERSION").to_string(),
                count,
            },
        }
    }
}

/// Format a single value as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data, None))
}

/// Format a list as pretty-printed JSON, recording its length
pub fn format_json_list<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(items, Some(items.len())))
}
