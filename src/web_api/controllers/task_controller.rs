use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::data_context::{ListTasksParams, UpdateTaskParams, MAX_PAGE_SIZE};
use crate::error::DataAccessError;
use crate::{
    app_state::SharedState, create_task_request::CreateTaskRequest,
    list_tasks_query::ListTasksQuery, list_tasks_response::ListTasksResponse, task::Task,
    task_get_response::TaskGetResponse, task_sort::TaskSort, update_task_request::UpdateTaskRequest,
};

pub struct TaskController {}

impl TaskController {
    pub async fn get_all(
        State(state): State<SharedState>,
        Query(query): Query<ListTasksQuery>,
    ) -> Result<Json<ListTasksResponse>, (StatusCode, String)> {
        // An explicitly invalid sort is rejected, never silently defaulted.
        let sort = match query.sort.as_deref() {
            Some(raw) => Some(
                raw.parse::<TaskSort>()
                    .map_err(|message| (StatusCode::UNPROCESSABLE_ENTITY, message))?,
            ),
            None => None,
        };

        if let Some(limit) = query.limit {
            if limit == 0 || limit > MAX_PAGE_SIZE {
                return Err((
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("limit must be between 1 and {MAX_PAGE_SIZE}"),
                ));
            }
        }

        let page = state
            .data_context
            .list_tasks(ListTasksParams {
                sort,
                limit: query.limit,
                cursor: query.cursor,
            })
            .map_err(resolve_error)?;

        Ok(Json(ListTasksResponse {
            tasks: page.tasks.iter().map(Task::to_get_dto).collect(),
            next_cursor: page.next_cursor,
        }))
    }

    pub async fn add(
        State(state): State<SharedState>,
        Json(body): Json<CreateTaskRequest>,
    ) -> Result<(StatusCode, Json<TaskGetResponse>), (StatusCode, String)> {
        body.validate()
            .map_err(|message| (StatusCode::UNPROCESSABLE_ENTITY, message))?;

        let task = Task::new(body.clone());
        match state.data_context.create_task(&task) {
            Ok(()) => Ok((StatusCode::CREATED, Json(task.to_get_dto()))),
            Err(DataAccessError::UniqueKeyConstraint) => {
                // The generated id collided with an existing row; retry once
                // with a fresh id, then give up.
                tracing::warn!(id = %task.id, "generated task id collided, retrying once");
                let retry = Task::new(body);
                state
                    .data_context
                    .create_task(&retry)
                    .map_err(resolve_error)?;
                Ok((StatusCode::CREATED, Json(retry.to_get_dto())))
            }
            Err(err) => Err(resolve_error(err)),
        }
    }

    pub async fn edit(
        State(state): State<SharedState>,
        Path(id): Path<Uuid>,
        Json(body): Json<UpdateTaskRequest>,
    ) -> Result<Json<TaskGetResponse>, (StatusCode, String)> {
        body.validate()
            .map_err(|message| (StatusCode::UNPROCESSABLE_ENTITY, message))?;

        let task = state
            .data_context
            .update_task(UpdateTaskParams {
                id,
                name: body.name,
                description: body.description,
                due_at: body.due_at,
                version: body.version,
            })
            .map_err(resolve_error)?;

        Ok(Json(task.to_get_dto()))
    }
}

pub fn resolve_error(err: DataAccessError) -> (StatusCode, String) {
    match &err {
        DataAccessError::InvalidCursorFormat | DataAccessError::CursorSortMismatch { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        DataAccessError::UpdateConflictOrNotFound { .. } | DataAccessError::UniqueKeyConstraint => {
            (StatusCode::CONFLICT, err.to_string())
        }
        DataAccessError::Database(_) => {
            tracing::error!("data access failure: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    }
}
