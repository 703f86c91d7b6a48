//! Core types and error definitions for the voxagent TTS service.
//!
//! This crate provides the foundational types shared across all voxagent
//! crates: error handling, the task record and its lifecycle status, the
//! quality report, and the JSON request/response shapes of the HTTP surface.
//!
//! # Main types
//!
//! - [`VoxError`] — Unified error enum for all voxagent subsystems.
//! - [`VoxResult`] — Convenience alias for `Result<T, VoxError>`.
//! - [`TaskStatus`] — Lifecycle state of a synthesis task.
//! - [`TaskRecord`] — A single text-to-speech task and its derived artifacts.
//! - [`QualityReport`] — Heuristic quality assessment of a finished task.
//! - [`TtsRequest`] — The JSON body accepted by `POST /tts`.

/// Request and response JSON shapes for the HTTP surface.
pub mod request;
/// Task records, lifecycle status, and quality reports.
pub mod task;

pub use request::{BatchTtsRequest, TtsAccepted, TtsRequest, VoiceInfo, VoiceSettings};
pub use task::{QualityReport, TaskRecord, TaskStatus};

/// Top-level error type for the voxagent service.
///
/// Each variant corresponds to a failure class defined by the task
/// lifecycle: synchronous rejections (`InvalidInput`, `NotFound`), terminal
/// task failures (`Synthesis`), and infrastructure errors.
#[derive(Debug, thiserror::Error)]
pub enum VoxError {
    /// The request was rejected before a task was created (empty or
    /// oversized text, oversized batch).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An unknown task or artifact identifier.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The speech-synthesis provider call failed. Terminal for the task,
    /// never retried automatically.
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// An error from an outbound HTTP request (provider API call).
    #[error("HTTP error: {0}")]
    Http(String),
}

/// A convenience `Result` alias using [`VoxError`].
pub type VoxResult<T> = Result<T, VoxError>;
