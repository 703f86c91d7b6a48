use crate::artifacts::ArtifactStore;
use crate::qc;
use crate::store::TaskStore;
use crate::subtitle;
use crate::synth::{SynthesisBackend, SynthesisRequest};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;
use voxagent_core::{BatchTtsRequest, TaskRecord, TaskStatus, TtsRequest, VoxError, VoxResult};

/// Maximum accepted text length, in characters.
pub const MAX_TEXT_CHARS: usize = 5000;
/// Maximum number of texts in a single batch request.
pub const MAX_BATCH_TASKS: usize = 10;
/// Duration estimate per input character, in seconds. A placeholder
/// heuristic, not measured from audio; subtitle timing and quality scoring
/// are defined relative to this estimate.
pub const SECONDS_PER_CHAR: f64 = 0.1;

/// Estimated audio duration for the given text, in seconds.
pub fn estimate_duration(text: &str) -> f64 {
    text.chars().count() as f64 * SECONDS_PER_CHAR
}

/// Drives each submitted task from creation to a terminal state.
///
/// `submit` allocates a pending record and schedules the run on the tokio
/// runtime without blocking the caller. Each record is mutated only by its
/// own run; runs for different tasks share nothing but the stores. There is
/// no cancellation, no retry, and no timeout on the synthesis call: a
/// failed synthesis is terminal and callers resubmit if they want another
/// attempt.
pub struct TaskPipeline {
    store: Arc<dyn TaskStore>,
    artifacts: Arc<dyn ArtifactStore>,
    backend: Arc<dyn SynthesisBackend>,
    running: Mutex<HashMap<Uuid, JoinHandle<()>>>,
}

impl TaskPipeline {
    /// Creates a pipeline over the given stores and synthesis backend.
    pub fn new(
        store: Arc<dyn TaskStore>,
        artifacts: Arc<dyn ArtifactStore>,
        backend: Arc<dyn SynthesisBackend>,
    ) -> Arc<Self> {
        Arc::new(Self {
            store,
            artifacts,
            backend,
            running: Mutex::new(HashMap::new()),
        })
    }

    /// The task store backing this pipeline.
    pub fn store(&self) -> &Arc<dyn TaskStore> {
        &self.store
    }

    /// The artifact store backing this pipeline.
    pub fn artifacts(&self) -> &Arc<dyn ArtifactStore> {
        &self.artifacts
    }

    /// The synthesis backend in use.
    pub fn backend(&self) -> &Arc<dyn SynthesisBackend> {
        &self.backend
    }

    fn validate_text(text: &str) -> VoxResult<()> {
        if text.trim().is_empty() {
            return Err(VoxError::InvalidInput("text must not be empty".to_string()));
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(VoxError::InvalidInput(format!(
                "text must not exceed {MAX_TEXT_CHARS} characters"
            )));
        }
        Ok(())
    }

    /// Validates the request, stores a pending record, and schedules the
    /// asynchronous run. Returns the pending record snapshot immediately;
    /// completion is observed by polling or via [`TaskPipeline::wait`].
    pub async fn submit(self: &Arc<Self>, request: TtsRequest) -> VoxResult<TaskRecord> {
        Self::validate_text(&request.text)?;

        let record = TaskRecord::new(request.text.clone(), request.voice_id.clone());
        let id = record.task_id;
        self.store.insert(record.clone()).await?;

        info!(task_id = %id, chars = request.text.chars().count(), "TTS task created");

        // Holding the registry lock across the insert orders it before the
        // run's self-removal, so the entry cannot outlive the run.
        let mut running = self.running.lock().await;
        let pipeline = Arc::clone(self);
        let handle = tokio::spawn(async move {
            pipeline.run(id, request).await;
            pipeline.running.lock().await.remove(&id);
        });
        running.insert(id, handle);
        drop(running);

        Ok(record)
    }

    /// Fans a batch out to [`TaskPipeline::submit`], one task per text.
    ///
    /// An oversized batch or any invalid text rejects the whole request
    /// before a single task is created.
    pub async fn submit_batch(self: &Arc<Self>, batch: &BatchTtsRequest) -> VoxResult<Vec<Uuid>> {
        if batch.texts.len() > MAX_BATCH_TASKS {
            return Err(VoxError::InvalidInput(format!(
                "batch must not exceed {MAX_BATCH_TASKS} texts"
            )));
        }
        for text in &batch.texts {
            Self::validate_text(text)?;
        }

        let mut ids = Vec::with_capacity(batch.texts.len());
        for request in batch.expand() {
            ids.push(self.submit(request).await?.task_id);
        }
        Ok(ids)
    }

    /// Awaits the background run of the given task, if one is still
    /// registered. A deterministic join point for tests; production callers
    /// poll the record instead.
    pub async fn wait(&self, id: Uuid) {
        let handle = self.running.lock().await.remove(&id);
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// Number of background runs that have not yet finished and pruned
    /// their registry entry.
    pub async fn active_runs(&self) -> usize {
        self.running.lock().await.len()
    }

    /// Removes the record and every derived artifact.
    ///
    /// Does not stop an in-flight run for the task; such a run aborts at
    /// its next store write (the update fails `NotFound`) and discards any
    /// partial artifacts.
    pub async fn delete(&self, id: Uuid) -> VoxResult<()> {
        self.store.delete(id).await?;
        self.artifacts.remove(id).await
    }

    /// The background run for one task. Failures inside [`Self::execute`]
    /// become a terminal `failed` record; partial artifacts are discarded.
    async fn run(&self, id: Uuid, request: TtsRequest) {
        if let Err(e) = self.execute(id, &request).await {
            warn!(task_id = %id, error = %e, "TTS task failed");
            if let Err(cleanup) = self.artifacts.remove(id).await {
                warn!(task_id = %id, error = %cleanup, "Failed to discard partial artifacts");
            }
            match self.store.get(id).await {
                Ok(mut record) if !record.is_terminal() => {
                    record.mark_failed(e.to_string());
                    if let Err(update) = self.store.update(record).await {
                        warn!(task_id = %id, error = %update, "Failed to record task failure");
                    }
                }
                // Deleted mid-run or already terminal; nothing to report.
                _ => {}
            }
        }
    }

    async fn execute(&self, id: Uuid, request: &TtsRequest) -> VoxResult<()> {
        let mut record = self.store.get(id).await?;
        record.status = TaskStatus::Processing;
        record.progress = 10;
        self.store.update(record.clone()).await?;

        info!(task_id = %id, backend = self.backend.name(), "Synthesis started");
        let audio = self.backend.synthesize(&SynthesisRequest::from(request)).await?;
        let audio_size = audio.len() as u64;
        self.artifacts.put_audio(id, audio).await?;
        record.progress = 50;
        self.store.update(record.clone()).await?;

        let duration = estimate_duration(&request.text);
        record.progress = 70;
        self.store.update(record.clone()).await?;

        let cues = subtitle::build_cues(&request.text, duration);
        self.artifacts
            .put_subtitle(id, subtitle::render_vtt(&cues))
            .await?;
        record.progress = 85;
        self.store.update(record.clone()).await?;

        let report = qc::assess(&request.text, Some(audio_size), duration);

        record.audio_url = Some(format!("/task/{id}/download"));
        record.vtt_url = Some(format!("/task/{id}/vtt"));
        record.file_size = Some(audio_size);
        record.duration = Some(duration);
        record.qc_report = Some(report);
        record.status = TaskStatus::Completed;
        record.progress = 100;
        record.completed_at = Some(Utc::now());
        self.store.update(record).await?;

        info!(task_id = %id, bytes = audio_size, cues = cues.len(), "TTS task completed");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::artifacts::InMemoryArtifactStore;
    use crate::store::InMemoryTaskStore;
    use crate::synth::MockBackend;
    use async_trait::async_trait;
    use voxagent_core::VoiceInfo;

    /// Backend whose synthesize call always fails.
    struct FailingBackend;

    /// Backend that parks inside synthesize until released, so tests can
    /// interleave other operations with an in-flight run.
    struct GatedBackend {
        gate: Arc<tokio::sync::Notify>,
    }

    #[async_trait]
    impl SynthesisBackend for GatedBackend {
        fn name(&self) -> &'static str {
            "gated"
        }

        async fn synthesize(&self, _request: &SynthesisRequest) -> VoxResult<Vec<u8>> {
            self.gate.notified().await;
            Ok(vec![0u8; 2048])
        }

        async fn voices(&self) -> VoxResult<Vec<VoiceInfo>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl SynthesisBackend for FailingBackend {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn synthesize(&self, _request: &SynthesisRequest) -> VoxResult<Vec<u8>> {
            Err(VoxError::Synthesis("provider unavailable".to_string()))
        }

        async fn voices(&self) -> VoxResult<Vec<VoiceInfo>> {
            Ok(Vec::new())
        }
    }

    fn mock_pipeline() -> Arc<TaskPipeline> {
        TaskPipeline::new(
            Arc::new(InMemoryTaskStore::new()),
            Arc::new(InMemoryArtifactStore::new()),
            Arc::new(MockBackend::new()),
        )
    }

    fn failing_pipeline() -> Arc<TaskPipeline> {
        TaskPipeline::new(
            Arc::new(InMemoryTaskStore::new()),
            Arc::new(InMemoryArtifactStore::new()),
            Arc::new(FailingBackend),
        )
    }

    #[tokio::test]
    async fn test_submit_returns_pending_immediately() {
        let pipeline = mock_pipeline();
        let record = pipeline
            .submit(TtsRequest::new("Hello world").with_voice("v1"))
            .await
            .unwrap();
        assert_eq!(record.status, TaskStatus::Pending);
        assert_eq!(record.progress, 0);

        // The record is retrievable right away, in pending or later state.
        let fetched = pipeline.store().get(record.task_id).await.unwrap();
        assert!(fetched.progress <= 100);
    }

    #[tokio::test]
    async fn test_hello_world_completes_with_artifacts() {
        let pipeline = mock_pipeline();
        let record = pipeline
            .submit(TtsRequest::new("Hello world").with_voice("v1"))
            .await
            .unwrap();
        let id = record.task_id;
        pipeline.wait(id).await;

        let done = pipeline.store().get(id).await.unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.progress, 100);
        assert!((done.duration.unwrap() - 1.1).abs() < 1e-9);
        assert_eq!(done.audio_url.as_deref(), Some(&format!("/task/{id}/download")[..]));
        assert!(done.completed_at.is_some());
        assert!(done.error_message.is_none());

        let report = done.qc_report.unwrap();
        assert!(report.score >= 0.0 && report.score <= 100.0);

        let audio = pipeline.artifacts().get_audio(id).await.unwrap().unwrap();
        assert_eq!(done.file_size, Some(audio.len() as u64));

        let vtt = pipeline.artifacts().get_subtitle(id).await.unwrap().unwrap();
        assert_eq!(
            vtt,
            "WEBVTT\n\n00:00:00.000 --> 00:00:01.100\nHello world\n\n"
        );
    }

    #[tokio::test]
    async fn test_empty_text_rejected_without_task() {
        let pipeline = mock_pipeline();
        let err = pipeline.submit(TtsRequest::new("")).await.unwrap_err();
        assert!(matches!(err, VoxError::InvalidInput(_)));

        let err = pipeline.submit(TtsRequest::new("   \n ")).await.unwrap_err();
        assert!(matches!(err, VoxError::InvalidInput(_)));

        let (_, total) = pipeline.store().list(0, 10).await.unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_oversized_text_rejected_without_task() {
        let pipeline = mock_pipeline();
        let err = pipeline
            .submit(TtsRequest::new("x".repeat(MAX_TEXT_CHARS + 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, VoxError::InvalidInput(_)));

        let (_, total) = pipeline.store().list(0, 10).await.unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_max_length_text_accepted() {
        let pipeline = mock_pipeline();
        let record = pipeline
            .submit(TtsRequest::new("x".repeat(MAX_TEXT_CHARS)))
            .await
            .unwrap();
        pipeline.wait(record.task_id).await;
        let done = pipeline.store().get(record.task_id).await.unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_failed_synthesis_is_terminal_with_detail() {
        let pipeline = failing_pipeline();
        let record = pipeline.submit(TtsRequest::new("Hello world")).await.unwrap();
        let id = record.task_id;
        pipeline.wait(id).await;

        let failed = pipeline.store().get(id).await.unwrap();
        assert_eq!(failed.status, TaskStatus::Failed);
        assert!(failed
            .error_message
            .as_deref()
            .unwrap()
            .contains("provider unavailable"));
        assert!(failed.completed_at.is_some());
        assert!(failed.audio_url.is_none());
        assert!(failed.qc_report.is_none());

        // No partial artifacts survive the failure.
        assert!(pipeline.artifacts().get_audio(id).await.unwrap().is_none());
        assert!(pipeline.artifacts().get_subtitle(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tasks_are_isolated() {
        let pipeline = mock_pipeline();
        let a = pipeline.submit(TtsRequest::new("first task text")).await.unwrap();
        let b = pipeline.submit(TtsRequest::new("second task text, rather longer")).await.unwrap();
        pipeline.wait(a.task_id).await;
        pipeline.wait(b.task_id).await;

        let done_a = pipeline.store().get(a.task_id).await.unwrap();
        let done_b = pipeline.store().get(b.task_id).await.unwrap();
        assert_eq!(done_a.text, "first task text");
        assert_eq!(done_b.text, "second task text, rather longer");
        assert_ne!(done_a.file_size, done_b.file_size);
        assert_eq!(done_a.status, TaskStatus::Completed);
        assert_eq!(done_b.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_batch_over_limit_creates_no_tasks() {
        let pipeline = mock_pipeline();
        let batch = BatchTtsRequest {
            texts: (0..11).map(|i| format!("text {i}")).collect(),
            voice_id: "v1".to_string(),
            voice_settings: None,
            model_id: "m1".to_string(),
            language: "en".to_string(),
            output_format: "mp3".to_string(),
        };
        let err = pipeline.submit_batch(&batch).await.unwrap_err();
        assert!(matches!(err, VoxError::InvalidInput(_)));

        let (_, total) = pipeline.store().list(0, 20).await.unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_batch_with_invalid_member_creates_no_tasks() {
        let pipeline = mock_pipeline();
        let batch = BatchTtsRequest {
            texts: vec!["fine".to_string(), "  ".to_string()],
            voice_id: "v1".to_string(),
            voice_settings: None,
            model_id: "m1".to_string(),
            language: "en".to_string(),
            output_format: "mp3".to_string(),
        };
        let err = pipeline.submit_batch(&batch).await.unwrap_err();
        assert!(matches!(err, VoxError::InvalidInput(_)));

        let (_, total) = pipeline.store().list(0, 10).await.unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_batch_fans_out_per_text() {
        let pipeline = mock_pipeline();
        let batch = BatchTtsRequest {
            texts: vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()],
            voice_id: "v2".to_string(),
            voice_settings: None,
            model_id: "m1".to_string(),
            language: "en".to_string(),
            output_format: "mp3".to_string(),
        };
        let ids = pipeline.submit_batch(&batch).await.unwrap();
        assert_eq!(ids.len(), 3);

        for id in ids {
            pipeline.wait(id).await;
            let record = pipeline.store().get(id).await.unwrap();
            assert_eq!(record.status, TaskStatus::Completed);
            assert_eq!(record.voice_id, "v2");
        }
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_artifacts() {
        let pipeline = mock_pipeline();
        let record = pipeline.submit(TtsRequest::new("delete me afterwards")).await.unwrap();
        let id = record.task_id;
        pipeline.wait(id).await;

        pipeline.delete(id).await.unwrap();
        assert!(matches!(
            pipeline.store().get(id).await.unwrap_err(),
            VoxError::NotFound(_)
        ));
        assert!(pipeline.artifacts().get_audio(id).await.unwrap().is_none());
        assert!(pipeline.artifacts().get_subtitle(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_during_run_stays_deleted() {
        let gate = Arc::new(tokio::sync::Notify::new());
        let pipeline = TaskPipeline::new(
            Arc::new(InMemoryTaskStore::new()),
            Arc::new(InMemoryArtifactStore::new()),
            Arc::new(GatedBackend {
                gate: Arc::clone(&gate),
            }),
        );

        let record = pipeline
            .submit(TtsRequest::new("delete me while synthesizing"))
            .await
            .unwrap();
        let id = record.task_id;

        // Let the run reach the gated synthesize call.
        loop {
            if pipeline.store().get(id).await.unwrap().status == TaskStatus::Processing {
                break;
            }
            tokio::task::yield_now().await;
        }

        pipeline.delete(id).await.unwrap();
        gate.notify_one();
        pipeline.wait(id).await;

        // The finishing run must not re-create the record or its artifacts.
        assert!(matches!(
            pipeline.store().get(id).await.unwrap_err(),
            VoxError::NotFound(_)
        ));
        assert!(pipeline.artifacts().get_audio(id).await.unwrap().is_none());
        assert!(pipeline.artifacts().get_subtitle(id).await.unwrap().is_none());
        let (_, total) = pipeline.store().list(0, 10).await.unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_finished_run_prunes_registry_entry() {
        let pipeline = mock_pipeline();
        let record = pipeline.submit(TtsRequest::new("prune my handle")).await.unwrap();
        let id = record.task_id;

        // Observe completion by polling, as production callers do; the run
        // removes its own registry entry right after.
        loop {
            if pipeline.store().get(id).await.unwrap().is_terminal()
                && pipeline.active_runs().await == 0
            {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(pipeline.active_runs().await, 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let pipeline = mock_pipeline();
        let err = pipeline.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, VoxError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duration_estimate_is_linear_in_chars() {
        assert!((estimate_duration("Hello world") - 1.1).abs() < 1e-9);
        assert!((estimate_duration("") - 0.0).abs() < 1e-9);
        assert!((estimate_duration(&"a".repeat(100)) - 10.0).abs() < 1e-9);
    }
}
