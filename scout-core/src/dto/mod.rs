//! Wire DTOs for the recruiting platform
//!
//! The platform wraps every payload in the same envelope and uses
//! camelCase field names. These types mirror the payloads and convert
//! into domain types; nothing outside the client should need them.

pub mod greeting;
pub mod recommend;

use serde::{Deserialize, Deserializer};

/// Common response envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub zp_data: Option<T>,
}

/// Accepts either a JSON string or a JSON number and yields a string
///
/// Identifiers come back as numbers on some endpoints and strings on others.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
