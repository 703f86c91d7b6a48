use crate::routes;
use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;
use voxagent_pipeline::TaskPipeline;

/// Shared application state.
pub struct AppState {
    /// The task pipeline serving every endpoint.
    pub pipeline: Arc<TaskPipeline>,
}

/// Assembles the HTTP surface of the TTS service.
pub struct GatewayServer;

impl GatewayServer {
    /// Builds the router over the given pipeline.
    pub fn build(pipeline: Arc<TaskPipeline>) -> Router {
        let state = Arc::new(AppState { pipeline });

        Router::new()
            .route("/", get(routes::root))
            .route("/health", get(routes::health))
            .route("/voices", get(routes::voices))
            .route("/tts", post(routes::create_task))
            .route("/batch-tts", post(routes::create_batch))
            .route("/tasks", get(routes::list_tasks))
            .route("/task/{id}", get(routes::get_task))
            .route("/task/{id}", delete(routes::delete_task))
            .route("/task/{id}/download", get(routes::download_audio))
            .route("/task/{id}/vtt", get(routes::download_vtt))
            .route("/task/{id}/qc-report", get(routes::qc_report))
            .with_state(state)
    }
}
