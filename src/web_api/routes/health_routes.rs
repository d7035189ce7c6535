use std::sync::Arc;

use axum::{routing::get, Router};

use super::super::controllers::health_controller::HealthController;
use crate::app_state::AppState;

pub const ROUTER_PATH: &str = "/health";

pub fn get_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(format!("{}/check_status", ROUTER_PATH).as_str(), get(HealthController::get))
        .with_state(app_state)
}
