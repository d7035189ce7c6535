use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use crate::error::DataAccessError;

/// Pagination position of the last row of a page, under whichever sort
/// column was active. The wire form is base64 of a JSON object keyed by the
/// column name (`created_at` or `due_at`) plus the row id, with timestamps
/// as RFC 3339 at millisecond precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorPosition {
    CreatedAt { value: DateTime<Utc>, id: String },
    DueAt { value: DateTime<Utc>, id: String },
}

impl CursorPosition {
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::CreatedAt { .. } => "created_at",
            Self::DueAt { .. } => "due_at",
        }
    }

    pub fn value(&self) -> &DateTime<Utc> {
        match self {
            Self::CreatedAt { value, .. } | Self::DueAt { value, .. } => value,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::CreatedAt { id, .. } | Self::DueAt { id, .. } => id,
        }
    }
}

/// Single timestamp format used for the cursor wire form, the stored columns
/// and the API responses. Fixed-width UTC text, so lexicographic comparison
/// equals chronological comparison.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|value| value.with_timezone(&Utc))
}

pub fn encode(position: &CursorPosition) -> String {
    let payload = match position {
        CursorPosition::CreatedAt { value, id } => {
            serde_json::json!({ "created_at": format_timestamp(value), "id": id })
        }
        CursorPosition::DueAt { value, id } => {
            serde_json::json!({ "due_at": format_timestamp(value), "id": id })
        }
    };
    STANDARD.encode(payload.to_string())
}

#[derive(Deserialize)]
struct CursorWire {
    created_at: Option<String>,
    due_at: Option<String>,
    id: Option<String>,
}

/// Tokens of either column shape are accepted; anything that is not valid
/// base64 + JSON, or where neither shape carries a parseable timestamp and a
/// non-empty id, is rejected.
pub fn decode(token: &str) -> Result<CursorPosition, DataAccessError> {
    let bytes = STANDARD
        .decode(token)
        .map_err(|_| DataAccessError::InvalidCursorFormat)?;
    let wire: CursorWire =
        serde_json::from_slice(&bytes).map_err(|_| DataAccessError::InvalidCursorFormat)?;

    let id = match wire.id {
        Some(id) if !id.is_empty() => id,
        _ => return Err(DataAccessError::InvalidCursorFormat),
    };

    if let Some(value) = wire.created_at.as_deref().and_then(parse_timestamp) {
        return Ok(CursorPosition::CreatedAt { value, id });
    }
    if let Some(value) = wire.due_at.as_deref().and_then(parse_timestamp) {
        return Ok(CursorPosition::DueAt { value, id });
    }

    Err(DataAccessError::InvalidCursorFormat)
}
