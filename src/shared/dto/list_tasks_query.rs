use serde::Deserialize;

/// Raw query parameters of `GET /tasks`. The cursor stays opaque here; the
/// sort string and limit are checked in the controller before the data
/// context sees them.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub sort: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}
