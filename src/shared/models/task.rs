use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    create_task_request::CreateTaskRequest, data_access::cursor,
    task_get_response::TaskGetResponse,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub due_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub version: i64,
}

impl Task {
    /// Fresh task with a server-generated id, `created_at` of now and version 0.
    pub fn new(request: CreateTaskRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            description: request.description,
            due_at: request.due_at,
            created_at: Utc::now(),
            version: 0,
        }
    }

    pub fn to_get_dto(&self) -> TaskGetResponse {
        TaskGetResponse {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            due_at: cursor::format_timestamp(&self.due_at),
            created_at: cursor::format_timestamp(&self.created_at),
            version: self.version,
        }
    }
}
