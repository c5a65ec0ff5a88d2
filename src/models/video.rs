//! Video model for storage and API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A video listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Decimal milliseconds since the Unix epoch at creation
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub producer: String,
    pub genre: String,
    /// Age rating, free-form
    pub age: String,
    pub playback_url: String,
    /// Whether `playback_url` points at a third-party host
    pub external: bool,
    /// RFC3339 creation time
    pub created_at: String,
}

/// Request body for `POST /videos`.
///
/// Fields are loosely typed: text fields take strings, numbers or booleans,
/// and `external` follows JSON truthiness. Missing required fields produce
/// a 400 with a useful message instead of a decode error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    #[serde(default, deserialize_with = "free_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "free_text")]
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "free_text")]
    pub producer: Option<String>,
    #[serde(default, deserialize_with = "free_text")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "free_text")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "free_text")]
    pub playback_url: Option<String>,
    #[serde(default, deserialize_with = "truthy")]
    pub external: bool,
}

/// Validated fields for a new video.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub publisher: String,
    pub producer: String,
    pub genre: String,
    pub age: String,
    pub playback_url: String,
    pub external: bool,
}

impl CreateVideoRequest {
    /// Check required fields and fill defaults for the rest.
    pub fn validate(self) -> Result<NewVideo, &'static str> {
        let title = required(self.title);
        let playback_url = required(self.playback_url);

        let (Some(title), Some(playback_url)) = (title, playback_url) else {
            return Err("Title and playbackUrl required");
        };

        Ok(NewVideo {
            title,
            publisher: self.publisher.unwrap_or_default(),
            producer: self.producer.unwrap_or_default(),
            genre: self.genre.unwrap_or_default(),
            age: self.age.unwrap_or_default(),
            playback_url,
            external: self.external,
        })
    }
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Text from any JSON scalar. `null`, `false` and `0` count as absent.
fn free_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// JSON truthiness: `null`, `false`, `0` and `""` are false, anything else true.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    })
}
