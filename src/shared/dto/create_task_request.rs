use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{validate_description, validate_name};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub name: String,
    pub description: String,
    pub due_at: DateTime<Utc>,
}

impl CreateTaskRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_description(&self.description)
    }
}
