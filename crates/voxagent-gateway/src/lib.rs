//! HTTP surface of the voxagent TTS service.
//!
//! A thin axum layer over the task pipeline: synchronous endpoints reject
//! invalid input with structured error payloads; everything asynchronous is
//! observed by polling the task record until it reaches a terminal status.

/// Error-to-response mapping.
pub mod error;
/// Request handlers.
pub mod routes;
/// Router assembly and shared state.
pub mod server;

pub use error::ApiError;
pub use server::{AppState, GatewayServer};
