use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Provider voice used when a request does not name one.
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
/// Provider synthesis model used when a request does not name one.
pub const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

/// Tuning knobs forwarded to the synthesis provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSettings {
    /// Voice stability, 0.0–1.0.
    pub stability: f64,
    /// Similarity boost, 0.0–1.0.
    pub similarity_boost: f64,
    /// Style exaggeration, 0.0–1.0.
    #[serde(default)]
    pub style: f64,
    /// Whether to enable the provider's speaker boost.
    #[serde(default = "default_true")]
    pub use_speaker_boost: bool,
}

fn default_true() -> bool {
    true
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

/// The JSON body accepted by `POST /tts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsRequest {
    /// Text to synthesize, 1–5000 characters after trimming.
    pub text: String,
    /// Provider voice identifier.
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    /// Optional voice tuning overrides.
    #[serde(default)]
    pub voice_settings: Option<VoiceSettings>,
    /// Provider synthesis model identifier.
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Language hint, pass-through metadata.
    #[serde(default = "default_language")]
    pub language: String,
    /// Requested audio container, pass-through metadata.
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

impl TtsRequest {
    /// Builds a request for the given text with all defaults.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: default_voice_id(),
            voice_settings: None,
            model_id: default_model_id(),
            language: default_language(),
            output_format: default_output_format(),
        }
    }

    /// Sets the voice identifier.
    pub fn with_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }
}

fn default_voice_id() -> String {
    DEFAULT_VOICE_ID.to_string()
}

fn default_model_id() -> String {
    DEFAULT_MODEL_ID.to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_output_format() -> String {
    "mp3".to_string()
}

/// The JSON body accepted by `POST /batch-tts`: up to 10 texts fanned out
/// to individual tasks sharing the same voice options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTtsRequest {
    /// Texts to synthesize, at most 10.
    pub texts: Vec<String>,
    /// Provider voice identifier applied to every task.
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    /// Optional voice tuning overrides applied to every task.
    #[serde(default)]
    pub voice_settings: Option<VoiceSettings>,
    /// Provider synthesis model identifier.
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Language hint, pass-through metadata.
    #[serde(default = "default_language")]
    pub language: String,
    /// Requested audio container, pass-through metadata.
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

impl BatchTtsRequest {
    /// Expands this batch into per-text [`TtsRequest`]s.
    pub fn expand(&self) -> Vec<TtsRequest> {
        self.texts
            .iter()
            .map(|text| TtsRequest {
                text: text.clone(),
                voice_id: self.voice_id.clone(),
                voice_settings: self.voice_settings.clone(),
                model_id: self.model_id.clone(),
                language: self.language.clone(),
                output_format: self.output_format.clone(),
            })
            .collect()
    }
}

/// The JSON response returned by `POST /tts` once a task is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsAccepted {
    /// Identifier of the created task.
    pub task_id: Uuid,
    /// Always `pending` at creation time.
    pub status: crate::TaskStatus,
    /// Human-readable acknowledgement.
    pub message: String,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
}

/// A voice available from the synthesis backend, as reported by
/// `GET /voices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceInfo {
    /// Provider voice identifier.
    pub voice_id: String,
    /// Display name.
    pub name: String,
    /// Provider category (e.g. `premade`).
    pub category: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Provider labels such as gender or age.
    #[serde(default)]
    pub labels: HashMap<String, String>,
}
