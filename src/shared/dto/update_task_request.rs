use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{validate_description, validate_name};

/// Full replacement of the mutable task fields, conditional on `version`
/// being the version the caller last observed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub name: String,
    pub description: String,
    pub due_at: DateTime<Utc>,
    pub version: i64,
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_description(&self.description)?;
        if self.version < 0 {
            return Err("version must be non-negative".to_string());
        }
        Ok(())
    }
}
