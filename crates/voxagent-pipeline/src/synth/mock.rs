use super::{SynthesisBackend, SynthesisRequest};
use async_trait::async_trait;
use std::collections::HashMap;
use voxagent_core::{VoiceInfo, VoxResult};

/// Minimum size of a mock payload, chosen to stay above the quality
/// scorer's implausibly-small threshold.
const BASE_PAYLOAD_BYTES: usize = 2048;
/// Additional payload bytes per input character.
const BYTES_PER_CHAR: usize = 16;

/// Offline stand-in for the synthesis provider.
///
/// Produces a placeholder payload whose size is a deterministic function of
/// the input text, so repeated runs and tests see identical output sizes.
#[derive(Default)]
pub struct MockBackend;

impl MockBackend {
    /// Creates the mock backend.
    pub fn new() -> Self {
        Self
    }

    /// Size of the payload generated for the given text.
    pub fn payload_size(text: &str) -> usize {
        BASE_PAYLOAD_BYTES + text.chars().count() * BYTES_PER_CHAR
    }
}

#[async_trait]
impl SynthesisBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> VoxResult<Vec<u8>> {
        let size = Self::payload_size(&request.text);
        let pattern = request.text.as_bytes();
        let payload = if pattern.is_empty() {
            vec![0u8; size]
        } else {
            pattern.iter().copied().cycle().take(size).collect()
        };
        Ok(payload)
    }

    async fn voices(&self) -> VoxResult<Vec<VoiceInfo>> {
        Ok(vec![
            VoiceInfo {
                voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
                name: "Rachel".to_string(),
                category: "premade".to_string(),
                description: Some("Default female voice".to_string()),
                labels: HashMap::from([
                    ("gender".to_string(), "female".to_string()),
                    ("age".to_string(), "young".to_string()),
                ]),
            },
            VoiceInfo {
                voice_id: "AZnzlk1XvdvUeBnXmlld".to_string(),
                name: "Domi".to_string(),
                category: "premade".to_string(),
                description: Some("Default male voice".to_string()),
                labels: HashMap::from([
                    ("gender".to_string(), "male".to_string()),
                    ("age".to_string(), "young".to_string()),
                ]),
            },
        ])
    }
}
