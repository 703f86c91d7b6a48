//! The asynchronous task-lifecycle pipeline of the voxagent TTS service.
//!
//! A submitted text becomes a [`TaskRecord`](voxagent_core::TaskRecord) in
//! `pending` state; a background execution drives it through synthesis,
//! subtitle timing, and heuristic quality scoring to a terminal state. The
//! submitting caller never waits for completion and polls the record
//! instead.
//!
//! # Components
//!
//! - [`TaskStore`] / [`InMemoryTaskStore`] — record storage.
//! - [`ArtifactStore`] / [`InMemoryArtifactStore`] — audio and subtitle
//!   artifacts.
//! - [`subtitle`] — caption cue timing and WebVTT rendering.
//! - [`qc`] — heuristic quality scoring.
//! - [`SynthesisBackend`] — provider abstraction (ElevenLabs or mock).
//! - [`TaskPipeline`] — the orchestration of all of the above per task.

/// Audio and subtitle artifact storage.
pub mod artifacts;
/// The per-task orchestration pipeline.
pub mod pipeline;
/// Heuristic quality scoring.
pub mod qc;
/// Task record storage.
pub mod store;
/// Caption cue timing and WebVTT rendering.
pub mod subtitle;
/// Speech-synthesis provider backends.
pub mod synth;

pub use artifacts::{ArtifactStore, InMemoryArtifactStore};
pub use pipeline::TaskPipeline;
pub use store::{InMemoryTaskStore, TaskStore};
pub use subtitle::SubtitleCue;
pub use synth::{MockBackend, SynthesisBackend, SynthesisConfig, SynthesisRequest};
