use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use voxagent_core::VoxResult;

/// Storage for the derived artifacts of a task: the audio payload and the
/// rendered WebVTT subtitle track.
///
/// Keyed by task id; removing a task removes both artifacts. Implementations
/// can be in-memory (default) or object-storage backed.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Stores the audio payload for a task.
    async fn put_audio(&self, id: Uuid, bytes: Vec<u8>) -> VoxResult<()>;

    /// Returns the audio payload, or `None` if absent.
    async fn get_audio(&self, id: Uuid) -> VoxResult<Option<Vec<u8>>>;

    /// Stores the rendered subtitle track for a task.
    async fn put_subtitle(&self, id: Uuid, vtt: String) -> VoxResult<()>;

    /// Returns the subtitle track, or `None` if absent.
    async fn get_subtitle(&self, id: Uuid) -> VoxResult<Option<String>>;

    /// Removes every artifact of the task. Absent artifacts are not an
    /// error; this is also used to discard partial output of a failed run.
    async fn remove(&self, id: Uuid) -> VoxResult<()>;
}

/// In-memory artifact store. No persistence; cleared on restart.
#[derive(Default)]
pub struct InMemoryArtifactStore {
    audio: RwLock<HashMap<Uuid, Vec<u8>>>,
    subtitles: RwLock<HashMap<Uuid, String>>,
}

impl InMemoryArtifactStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn put_audio(&self, id: Uuid, bytes: Vec<u8>) -> VoxResult<()> {
        self.audio.write().await.insert(id, bytes);
        Ok(())
    }

    async fn get_audio(&self, id: Uuid) -> VoxResult<Option<Vec<u8>>> {
        Ok(self.audio.read().await.get(&id).cloned())
    }

    async fn put_subtitle(&self, id: Uuid, vtt: String) -> VoxResult<()> {
        self.subtitles.write().await.insert(id, vtt);
        Ok(())
    }

    async fn get_subtitle(&self, id: Uuid) -> VoxResult<Option<String>> {
        Ok(self.subtitles.read().await.get(&id).cloned())
    }

    async fn remove(&self, id: Uuid) -> VoxResult<()> {
        self.audio.write().await.remove(&id);
        self.subtitles.write().await.remove(&id);
        Ok(())
    }
}
