use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use voxagent_core::{TaskRecord, VoxError, VoxResult};

/// Storage for task records.
///
/// The pipeline owns every mutation of a record; the store only provides
/// insert/lookup/delete consistency. Implementations may back this with a
/// database without touching the pipeline logic.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a freshly created record.
    async fn insert(&self, record: TaskRecord) -> VoxResult<()>;

    /// Returns a snapshot of the record, or `NotFound` for unknown ids.
    async fn get(&self, id: Uuid) -> VoxResult<TaskRecord>;

    /// Replaces the stored record with the given snapshot, or fails
    /// `NotFound` when the task no longer exists. An update must never
    /// re-create a deleted record.
    async fn update(&self, record: TaskRecord) -> VoxResult<()>;

    /// Removes the record, or fails `NotFound` for unknown ids.
    async fn delete(&self, id: Uuid) -> VoxResult<()>;

    /// Returns a page of records ordered by creation time, newest first,
    /// along with the total record count.
    async fn list(&self, offset: usize, limit: usize) -> VoxResult<(Vec<TaskRecord>, usize)>;
}

/// In-memory task store. No persistence; cleared on restart.
#[derive(Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, TaskRecord>>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, record: TaskRecord) -> VoxResult<()> {
        let mut tasks = self.tasks.write().await;
        tasks.insert(record.task_id, record);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> VoxResult<TaskRecord> {
        let tasks = self.tasks.read().await;
        tasks
            .get(&id)
            .cloned()
            .ok_or_else(|| VoxError::NotFound(format!("task {id}")))
    }

    async fn update(&self, record: TaskRecord) -> VoxResult<()> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&record.task_id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(VoxError::NotFound(format!("task {}", record.task_id))),
        }
    }

    async fn delete(&self, id: Uuid) -> VoxResult<()> {
        let mut tasks = self.tasks.write().await;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| VoxError::NotFound(format!("task {id}")))
    }

    async fn list(&self, offset: usize, limit: usize) -> VoxResult<(Vec<TaskRecord>, usize)> {
        let tasks = self.tasks.read().await;
        let total = tasks.len();
        let mut records: Vec<TaskRecord> = tasks.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let page = records.into_iter().skip(offset).take(limit).collect();
        Ok((page, total))
    }
}
