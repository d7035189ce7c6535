use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use super::super::controllers::task_controller::TaskController;
use crate::app_state::AppState;

pub const ROUTER_PATH: &str = "/tasks";

pub fn get_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(ROUTER_PATH, get(TaskController::get_all).post(TaskController::add))
        .route(format!("{}/:id", ROUTER_PATH).as_str(), put(TaskController::edit))
        .with_state(app_state)
}
