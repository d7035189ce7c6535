use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::data_access::cursor::{self, CursorPosition};
use crate::error::DataAccessError;
use crate::{task::Task, task_sort::TaskSort};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

const TASK_COLUMNS: &str = "id, name, description, due_at, created_at, version";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS task (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    due_at      TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    version     INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_task_created_at_id ON task (created_at, id);
CREATE INDEX IF NOT EXISTS idx_task_due_at_id ON task (due_at, id);
";

/// Keyset pagination parameters. `sort` and `limit` arrive already validated
/// from the controller; the cursor is opaque there and only decoded here.
#[derive(Debug, Default)]
pub struct ListTasksParams {
    pub sort: Option<TaskSort>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

#[derive(Debug)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub next_cursor: Option<String>,
}

/// Conditional update input. `version` is the version the caller last
/// observed; the update applies only if it still matches the stored row.
#[derive(Debug, Clone)]
pub struct UpdateTaskParams {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub due_at: DateTime<Utc>,
    pub version: i64,
}

#[derive(Clone)]
pub struct DataContext {
    conn: Arc<Mutex<Connection>>,
}

impl DataContext {
    pub fn new(path: &str) -> Result<Self, DataAccessError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self, DataAccessError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, DataAccessError> {
        conn.execute_batch(SCHEMA)?;
        Ok(DataContext {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("connection mutex poisoned")
    }

    pub fn create_task(&self, task: &Task) -> Result<(), DataAccessError> {
        let conn = self.conn();
        let result = conn.execute(
            "INSERT INTO task (id, name, description, due_at, created_at, version) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                task.id.to_string(),
                task.name,
                task.description,
                cursor::format_timestamp(&task.due_at),
                cursor::format_timestamp(&task.created_at),
                task.version,
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(DataAccessError::UniqueKeyConstraint),
            Err(err) => Err(err.into()),
        }
    }

    pub fn get_task(&self, id: Uuid) -> Result<Option<Task>, DataAccessError> {
        let conn = self.conn();
        let task = conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM task WHERE id = ?1"),
                params![id.to_string()],
                map_task_row,
            )
            .optional()?;
        Ok(task)
    }

    /// One page of tasks in the requested sort order, strictly after the
    /// cursor position if one was supplied.
    ///
    /// The seek predicate ranges over the composite key `(sort column, id)`:
    /// strictly past the cursor on the sort column, or equal there and
    /// strictly past on id. The id tie-break keeps the order total when the
    /// sort column holds duplicate values, so no row is skipped or repeated
    /// across a page boundary. An empty page carries no next cursor;
    /// otherwise the cursor encodes the last row of the page.
    pub fn list_tasks(&self, request: ListTasksParams) -> Result<TaskPage, DataAccessError> {
        let sort = request.sort.unwrap_or_default();
        let limit = i64::from(
            request
                .limit
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        );

        let position = match request.cursor.as_deref() {
            Some(token) => {
                let position = cursor::decode(token)?;
                if position.column_name() != sort.column_name() {
                    return Err(DataAccessError::CursorSortMismatch {
                        requested: sort.as_str(),
                    });
                }
                Some(position)
            }
            None => None,
        };

        let column = sort.column_name();
        let (op, order) = if sort.ascending() {
            (">", "ASC")
        } else {
            ("<", "DESC")
        };

        let conn = self.conn();
        let tasks = match &position {
            Some(position) => {
                let sql = format!(
                    "SELECT {TASK_COLUMNS} FROM task \
                     WHERE {column} {op} ?1 OR ({column} = ?1 AND id {op} ?2) \
                     ORDER BY {column} {order}, id {order} LIMIT ?3"
                );
                let mut statement = conn.prepare(&sql)?;
                let rows = statement.query_map(
                    params![
                        cursor::format_timestamp(position.value()),
                        position.id(),
                        limit
                    ],
                    map_task_row,
                )?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let sql = format!(
                    "SELECT {TASK_COLUMNS} FROM task \
                     ORDER BY {column} {order}, id {order} LIMIT ?1"
                );
                let mut statement = conn.prepare(&sql)?;
                let rows = statement.query_map(params![limit], map_task_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        let next_cursor = tasks
            .last()
            .map(|task| cursor::encode(&page_position(task, sort)));

        Ok(TaskPage { tasks, next_cursor })
    }

    /// Compare-and-swap update: one conditional statement filtered on both id
    /// and version, bumping the version by exactly 1. Zero matched rows means
    /// the id does not exist or the caller's version is stale; the two causes
    /// are deliberately collapsed into one condition and the caller decides
    /// whether to re-fetch and retry. Never retried here.
    pub fn update_task(&self, request: UpdateTaskParams) -> Result<Task, DataAccessError> {
        let conn = self.conn();
        let updated = conn.execute(
            "UPDATE task SET name = ?1, description = ?2, due_at = ?3, version = version + 1 \
             WHERE id = ?4 AND version = ?5",
            params![
                request.name,
                request.description,
                cursor::format_timestamp(&request.due_at),
                request.id.to_string(),
                request.version,
            ],
        )?;

        if updated == 0 {
            return Err(DataAccessError::UpdateConflictOrNotFound {
                id: request.id.to_string(),
            });
        }

        let task = conn.query_row(
            &format!("SELECT {TASK_COLUMNS} FROM task WHERE id = ?1"),
            params![request.id.to_string()],
            map_task_row,
        )?;
        Ok(task)
    }
}

fn page_position(task: &Task, sort: TaskSort) -> CursorPosition {
    match sort {
        TaskSort::CreatedAtAsc | TaskSort::CreatedAtDesc => CursorPosition::CreatedAt {
            value: task.created_at,
            id: task.id.to_string(),
        },
        TaskSort::DueAtAsc | TaskSort::DueAtDesc => CursorPosition::DueAt {
            value: task.due_at,
            id: task.id.to_string(),
        },
    }
}

fn map_task_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    let id: String = row.get(0)?;
    let due_at: String = row.get(3)?;
    let created_at: String = row.get(4)?;
    Ok(Task {
        id: Uuid::parse_str(&id).map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
        })?,
        name: row.get(1)?,
        description: row.get(2)?,
        due_at: parse_timestamp_column(3, &due_at)?,
        created_at: parse_timestamp_column(4, &created_at)?,
        version: row.get(5)?,
    })
}

fn parse_timestamp_column(index: usize, text: &str) -> rusqlite::Result<DateTime<Utc>> {
    cursor::parse_timestamp(text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            rusqlite::types::Type::Text,
            format!("invalid timestamp: {text}").into(),
        )
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(code, _)
        if code.code == rusqlite::ErrorCode::ConstraintViolation)
}
