use super::{SynthesisBackend, SynthesisRequest};
use async_trait::async_trait;
use serde::Deserialize;
use voxagent_core::{VoiceInfo, VoxError, VoxResult};

/// Production API endpoint of the provider.
pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// Backend for the ElevenLabs text-to-speech API.
pub struct ElevenLabsBackend {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl ElevenLabsBackend {
    /// Creates a backend for the given credential and base URL.
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }
}

/// Shape of the provider's `GET /v1/voices` response.
#[derive(Deserialize)]
struct VoicesResponse {
    voices: Vec<ProviderVoice>,
}

#[derive(Deserialize)]
struct ProviderVoice {
    voice_id: String,
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    labels: std::collections::HashMap<String, String>,
}

#[async_trait]
impl SynthesisBackend for ElevenLabsBackend {
    fn name(&self) -> &'static str {
        "elevenlabs"
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> VoxResult<Vec<u8>> {
        let url = format!("{}/v1/text-to-speech/{}", self.base_url, request.voice_id);
        let body = serde_json::json!({
            "text": request.text,
            "model_id": request.model_id,
            "voice_settings": {
                "stability": request.voice_settings.stability,
                "similarity_boost": request.voice_settings.similarity_boost,
                "style": request.voice_settings.style,
                "use_speaker_boost": request.voice_settings.use_speaker_boost,
            },
        });

        let response = self
            .http
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VoxError::Synthesis(format!("provider request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(VoxError::Synthesis(format!(
                "provider returned {status}: {detail}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| VoxError::Synthesis(format!("failed to read provider audio: {e}")))?;
        Ok(bytes.to_vec())
    }

    async fn voices(&self) -> VoxResult<Vec<VoiceInfo>> {
        let url = format!("{}/v1/voices", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("xi-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| VoxError::Http(format!("voice list request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VoxError::Http(format!("voice list returned {status}")));
        }

        let parsed: VoicesResponse = response
            .json()
            .await
            .map_err(|e| VoxError::Http(format!("failed to parse voice list: {e}")))?;

        Ok(parsed
            .voices
            .into_iter()
            .map(|v| VoiceInfo {
                voice_id: v.voice_id,
                name: v.name,
                category: v.category.unwrap_or_else(|| "unknown".to_string()),
                description: v.description,
                labels: v.labels,
            })
            .collect())
    }
}
