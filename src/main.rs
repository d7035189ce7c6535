use std::net::SocketAddr;
use std::sync::Arc;

use task_server::{app_state::AppState, data_context::DataContext, map_routes, settings::Settings};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load().expect("Failed to load settings");

    let data_context = DataContext::new(&settings.database_path)
        .expect("Failed to open task database");

    let app_state = Arc::new(AppState { data_context });

    let app = map_routes(app_state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    let addr: SocketAddr = format!("{}:{}", settings.tcp_socket_binding, settings.tcp_socket_port)
        .parse()
        .expect("Invalid socket binding in settings");

    tracing::info!("Task server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
