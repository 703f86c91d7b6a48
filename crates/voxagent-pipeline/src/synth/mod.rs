//! Speech-synthesis provider backends.
//!
//! The pipeline only sees the [`SynthesisBackend`] trait. The ElevenLabs
//! backend talks to the real provider API; the mock backend produces a
//! placeholder payload of deterministic size and is selected automatically
//! when no credential is configured.

/// The ElevenLabs provider backend.
pub mod elevenlabs;
/// The offline mock backend.
pub mod mock;

pub use elevenlabs::ElevenLabsBackend;
pub use mock::MockBackend;

use async_trait::async_trait;
use voxagent_core::{TtsRequest, VoiceInfo, VoiceSettings, VoxResult};

/// The parameters of a single synthesis call.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// Text to synthesize.
    pub text: String,
    /// Provider voice identifier.
    pub voice_id: String,
    /// Voice tuning parameters.
    pub voice_settings: VoiceSettings,
    /// Provider synthesis model identifier.
    pub model_id: String,
}

impl From<&TtsRequest> for SynthesisRequest {
    fn from(request: &TtsRequest) -> Self {
        Self {
            text: request.text.clone(),
            voice_id: request.voice_id.clone(),
            voice_settings: request.voice_settings.clone().unwrap_or_default(),
            model_id: request.model_id.clone(),
        }
    }
}

/// A capability that turns text and voice parameters into audio bytes.
///
/// To add a provider: implement this trait in a new module under `synth/`
/// and wire it up in [`SynthesisConfig::into_backend`].
#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    /// Short backend name used in health and banner responses.
    fn name(&self) -> &'static str;

    /// Synthesizes the request into audio bytes. A provider error or
    /// non-success response surfaces as `VoxError::Synthesis`.
    async fn synthesize(&self, request: &SynthesisRequest) -> VoxResult<Vec<u8>>;

    /// Lists the voices available from this backend.
    async fn voices(&self) -> VoxResult<Vec<VoiceInfo>>;
}

/// Configuration for selecting and building a synthesis backend.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SynthesisConfig {
    /// Provider API key. When unset or empty, the mock backend is used.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Provider base URL override, for testing or proxies.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl SynthesisConfig {
    /// Reads the configuration from the `ELEVENLABS_API_KEY` environment
    /// variable.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("ELEVENLABS_API_KEY").ok(),
            base_url: None,
        }
    }

    /// Builds the backend this configuration selects: ElevenLabs when a
    /// non-empty credential is present, the mock otherwise.
    pub fn into_backend(self) -> Box<dyn SynthesisBackend> {
        match self.api_key {
            Some(ref key) if !key.is_empty() => Box::new(ElevenLabsBackend::new(
                key.clone(),
                self.base_url
                    .unwrap_or_else(|| elevenlabs::DEFAULT_BASE_URL.to_string()),
            )),
            _ => Box::new(MockBackend::new()),
        }
    }
}
