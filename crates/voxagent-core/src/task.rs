use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a synthesis task.
///
/// Transitions are `Pending → Processing → {Completed | Failed}`. The two
/// terminal states are never left once entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Created and queued; the pipeline has not started yet.
    Pending,
    /// The pipeline is driving the task through synthesis and artifact
    /// generation.
    Processing,
    /// Terminal: audio, subtitle, and quality report are all populated.
    Completed,
    /// Terminal: `error_message` is populated; no artifacts are exposed.
    Failed,
}

impl TaskStatus {
    /// Whether this status is terminal (no further transitions allowed).
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Processing => write!(f, "processing"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Heuristic quality assessment of a completed synthesis task.
///
/// Produced once by the quality scorer and immutable afterwards. All scores
/// are in `[0, 100]`; the overall `score` is the arithmetic mean of the
/// three sub-scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    /// Overall quality score, mean of the three sub-scores.
    pub score: f64,
    /// Plausibility of the produced audio, estimated from output size.
    pub audio_quality: f64,
    /// Suitability of the input text for synthesis.
    pub text_accuracy: f64,
    /// Plausibility of the speaking rate derived from the duration estimate.
    pub voice_consistency: f64,
    /// Problems detected during assessment.
    pub issues: Vec<String>,
    /// Suggested follow-ups, one per detected problem plus a closing
    /// recommendation based on the overall score band.
    pub recommendations: Vec<String>,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
}

/// A single text-to-speech task and its derived artifacts.
///
/// Created in [`TaskStatus::Pending`] by the submit operation and mutated
/// only by the pipeline execution that owns it. Once a terminal status is
/// reached, exactly one of `error_message` or the artifact references
/// (`audio_url`, `vtt_url`, `qc_report`) is populated and the record is
/// never mutated again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Unique identifier for this task.
    pub task_id: Uuid,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// Progress in percent, monotonically non-decreasing until terminal.
    pub progress: u8,
    /// The input text to synthesize.
    pub text: String,
    /// The requested provider voice.
    pub voice_id: String,
    /// Download path for the audio artifact, set on success.
    pub audio_url: Option<String>,
    /// Download path for the WebVTT subtitle artifact, set on success.
    pub vtt_url: Option<String>,
    /// Estimated audio duration in seconds. Derived from text length, not
    /// measured from the audio.
    pub duration: Option<f64>,
    /// Size of the audio artifact in bytes, set on success.
    pub file_size: Option<u64>,
    /// Quality report, set on success.
    pub qc_report: Option<QualityReport>,
    /// Failure detail, set only when status is [`TaskStatus::Failed`].
    pub error_message: Option<String>,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task reached a terminal status.
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// Creates a new pending record for the given text and voice.
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            task_id: Uuid::new_v4(),
            status: TaskStatus::Pending,
            progress: 0,
            text: text.into(),
            voice_id: voice_id.into(),
            audio_url: None,
            vtt_url: None,
            duration: None,
            file_size: None,
            qc_report: None,
            error_message: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Whether the record has reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Marks the record failed with the given error detail and stamps the
    /// completion time.
    pub fn mark_failed(&mut self, detail: impl Into<String>) {
        self.status = TaskStatus::Failed;
        self.error_message = Some(detail.into());
        self.completed_at = Some(Utc::now());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_pending() {
        let record = TaskRecord::new("Hello world", "v1");
        assert_eq!(record.status, TaskStatus::Pending);
        assert_eq!(record.progress, 0);
        assert!(record.audio_url.is_none());
        assert!(record.error_message.is_none());
        assert!(record.completed_at.is_none());
        assert!(!record.is_terminal());
    }

    #[test]
    fn test_mark_failed_is_terminal() {
        let mut record = TaskRecord::new("Hello", "v1");
        record.mark_failed("provider unreachable");
        assert_eq!(record.status, TaskStatus::Failed);
        assert_eq!(record.error_message.as_deref(), Some("provider unreachable"));
        assert!(record.completed_at.is_some());
        assert!(record.is_terminal());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Failed).unwrap(),
            "\"failed\""
        );
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = TaskRecord::new("Hi", "v1");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("taskId").is_some());
        assert!(json.get("voiceId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("errorMessage").is_some());
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn test_record_round_trips() {
        let record = TaskRecord::new("Round trip", "v2");
        let json = serde_json::to_string(&record).unwrap();
        let parsed: TaskRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.task_id, record.task_id);
        assert_eq!(parsed.status, TaskStatus::Pending);
        assert_eq!(parsed.text, "Round trip");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TaskStatus::Processing.to_string(), "processing");
        assert_eq!(TaskStatus::Completed.to_string(), "completed");
    }
}
