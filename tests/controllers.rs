use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{TimeZone, Utc};
use task_server::app_state::{AppState, SharedState};
use task_server::create_task_request::CreateTaskRequest;
use task_server::data_context::DataContext;
use task_server::list_tasks_query::ListTasksQuery;
use task_server::task_controller::TaskController;
use task_server::update_task_request::UpdateTaskRequest;
use uuid::Uuid;

fn shared_state() -> SharedState {
    Arc::new(AppState {
        data_context: DataContext::in_memory().expect("in-memory store"),
    })
}

fn create_request(name: &str) -> CreateTaskRequest {
    CreateTaskRequest {
        name: name.to_string(),
        description: format!("{name} description"),
        due_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn create_then_list_round_trip() {
    let state = shared_state();

    let (status, Json(created)) =
        TaskController::add(State(state.clone()), Json(create_request("Write the report")))
            .await
            .expect("create task");
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.version, 0);
    assert_eq!(created.due_at, "2024-06-01T12:00:00.000Z");

    let Json(listing) = TaskController::get_all(State(state), Query(ListTasksQuery::default()))
        .await
        .expect("list tasks");
    assert_eq!(listing.tasks.len(), 1);
    assert_eq!(listing.tasks[0].id, created.id);
    assert_eq!(listing.tasks[0].name, "Write the report");
    assert!(listing.next_cursor.is_some());
}

#[tokio::test]
async fn task_json_uses_camel_case_and_iso_timestamps() {
    let state = shared_state();
    let (_, Json(created)) = TaskController::add(State(state), Json(create_request("Wire check")))
        .await
        .expect("create task");

    let value = serde_json::to_value(&created).expect("serialize response");
    let object = value.as_object().expect("object");
    for key in ["id", "name", "description", "dueAt", "createdAt", "version"] {
        assert!(object.contains_key(key), "missing key {key}");
    }
    assert!(object["createdAt"]
        .as_str()
        .expect("createdAt string")
        .ends_with('Z'));
}

#[tokio::test]
async fn empty_name_is_unprocessable() {
    let state = shared_state();
    let result = TaskController::add(State(state), Json(create_request(""))).await;
    let (status, message) = result.err().expect("validation failure");
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(message.contains("name"));
}

#[tokio::test]
async fn invalid_sort_is_unprocessable() {
    let state = shared_state();
    let query = ListTasksQuery {
        sort: Some("created_at:sideways".to_string()),
        ..ListTasksQuery::default()
    };
    let result = TaskController::get_all(State(state), Query(query)).await;
    let (status, _) = result.err().expect("sort rejection");
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn out_of_range_limit_is_unprocessable() {
    let state = shared_state();
    for limit in [0u32, 101] {
        let query = ListTasksQuery {
            limit: Some(limit),
            ..ListTasksQuery::default()
        };
        let result = TaskController::get_all(State(state.clone()), Query(query)).await;
        let (status, _) = result.err().expect("limit rejection");
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "limit {limit}");
    }
}

#[tokio::test]
async fn malformed_cursor_is_unprocessable() {
    let state = shared_state();
    let query = ListTasksQuery {
        cursor: Some("!!not-a-cursor!!".to_string()),
        ..ListTasksQuery::default()
    };
    let result = TaskController::get_all(State(state), Query(query)).await;
    let (status, message) = result.err().expect("cursor rejection");
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(message.contains("cursor"));
}

#[tokio::test]
async fn edit_bumps_the_version() {
    let state = shared_state();
    let (_, Json(created)) =
        TaskController::add(State(state.clone()), Json(create_request("Before edit")))
            .await
            .expect("create task");

    let Json(updated) = TaskController::edit(
        State(state),
        Path(created.id),
        Json(UpdateTaskRequest {
            name: "After edit".to_string(),
            description: "Edited description".to_string(),
            due_at: Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
            version: 0,
        }),
    )
    .await
    .expect("edit task");

    assert_eq!(updated.name, "After edit");
    assert_eq!(updated.version, 1);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn stale_edit_is_a_conflict() {
    let state = shared_state();
    let (_, Json(created)) =
        TaskController::add(State(state.clone()), Json(create_request("Contended")))
            .await
            .expect("create task");

    let winning = UpdateTaskRequest {
        name: "Winner".to_string(),
        description: "Winner description".to_string(),
        due_at: Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
        version: 0,
    };
    TaskController::edit(State(state.clone()), Path(created.id), Json(winning.clone()))
        .await
        .expect("first edit");

    let result = TaskController::edit(State(state), Path(created.id), Json(winning)).await;
    let (status, _) = result.err().expect("stale edit rejection");
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn editing_an_unknown_id_is_a_conflict() {
    let state = shared_state();
    let result = TaskController::edit(
        State(state),
        Path(Uuid::new_v4()),
        Json(UpdateTaskRequest {
            name: "Ghost".to_string(),
            description: "Ghost description".to_string(),
            due_at: Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
            version: 0,
        }),
    )
    .await;
    let (status, _) = result.err().expect("unknown id rejection");
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn negative_version_is_unprocessable() {
    let state = shared_state();
    let result = TaskController::edit(
        State(state),
        Path(Uuid::new_v4()),
        Json(UpdateTaskRequest {
            name: "Any".to_string(),
            description: "Any description".to_string(),
            due_at: Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
            version: -1,
        }),
    )
    .await;
    let (status, _) = result.err().expect("negative version rejection");
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
