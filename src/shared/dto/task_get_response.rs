use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGetResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub due_at: String,
    pub created_at: String,
    pub version: i64,
}
