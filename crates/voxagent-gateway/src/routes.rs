use crate::error::ApiError;
use crate::server::AppState;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use voxagent_core::{
    BatchTtsRequest, TaskRecord, TaskStatus, TtsAccepted, TtsRequest, VoxError,
};

/// `GET /` — service banner.
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "voxagent TTS service",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "backend": state.pipeline.backend().name(),
    }))
}

/// `GET /health` — liveness probe.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "backend": state.pipeline.backend().name(),
    }))
}

/// `GET /voices` — the voices offered by the synthesis backend.
pub async fn voices(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let voices = state.pipeline.backend().voices().await?;
    Ok(Json(serde_json::json!({ "voices": voices })))
}

/// `POST /tts` — create a synthesis task.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TtsRequest>,
) -> Result<Json<TtsAccepted>, ApiError> {
    let record = state.pipeline.submit(request).await?;
    Ok(Json(TtsAccepted {
        task_id: record.task_id,
        status: TaskStatus::Pending,
        message: "TTS task created; synthesis is running in the background".to_string(),
        created_at: record.created_at,
    }))
}

/// `POST /batch-tts` — fan a batch of texts out to individual tasks.
pub async fn create_batch(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<BatchTtsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let task_ids = state.pipeline.submit_batch(&batch).await?;
    let total_tasks = task_ids.len();
    info!(count = total_tasks, "Batch TTS accepted");
    Ok(Json(serde_json::json!({
        "batchId": Uuid::new_v4(),
        "taskIds": task_ids,
        "totalTasks": total_tasks,
        "status": "created",
    })))
}

/// Query parameters of `GET /tasks`.
#[derive(Deserialize)]
pub struct ListQuery {
    /// Page size, default 50.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Records to skip, default 0.
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// `GET /tasks` — paginated task list, newest first.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (tasks, total) = state.pipeline.store().list(query.offset, query.limit).await?;
    Ok(Json(serde_json::json!({
        "tasks": tasks,
        "total": total,
        "limit": query.limit,
        "offset": query.offset,
    })))
}

/// `GET /task/{id}` — full task record snapshot.
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskRecord>, ApiError> {
    Ok(Json(state.pipeline.store().get(id).await?))
}

/// `DELETE /task/{id}` — remove the record and its artifacts.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.pipeline.delete(id).await?;
    info!(task_id = %id, "Task deleted");
    Ok(Json(serde_json::json!({
        "message": "task deleted, including audio and subtitle artifacts"
    })))
}

/// Fetches the record and rejects tasks that have not completed.
async fn completed_task(state: &AppState, id: Uuid) -> Result<TaskRecord, ApiError> {
    let record = state.pipeline.store().get(id).await?;
    if record.status != TaskStatus::Completed {
        return Err(VoxError::InvalidInput(format!(
            "task is not completed (status: {})",
            record.status
        ))
        .into());
    }
    Ok(record)
}

/// `GET /task/{id}/download` — the audio artifact.
pub async fn download_audio(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    completed_task(&state, id).await?;
    let audio = state
        .pipeline
        .artifacts()
        .get_audio(id)
        .await?
        .ok_or_else(|| VoxError::NotFound(format!("audio for task {id}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "audio/mpeg".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"tts_{id}.mp3\""),
            ),
        ],
        audio,
    ))
}

/// `GET /task/{id}/vtt` — the WebVTT subtitle artifact.
pub async fn download_vtt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    completed_task(&state, id).await?;
    let vtt = state
        .pipeline
        .artifacts()
        .get_subtitle(id)
        .await?
        .ok_or_else(|| VoxError::NotFound(format!("subtitle for task {id}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/vtt".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"subtitle_{id}.vtt\""),
            ),
        ],
        vtt,
    ))
}

/// `GET /task/{id}/qc-report` — the quality report.
pub async fn qc_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let record = completed_task(&state, id).await?;
    let report = record
        .qc_report
        .ok_or_else(|| VoxError::NotFound(format!("quality report for task {id}")))?;
    Ok(Json(report))
}
