//! extapi engine - query orchestration over the installed model
//!
//! Transports (the CLI, a server) go through this crate rather than the core
//! directly: every call resolves the current snapshot from a
//! [`ModelRegistry`](extapi_core::ModelRegistry), emits start/end events and
//! reports failures as a structured [`ExError`].

pub mod commands;

use extapi_core::ExError;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, ExError>;
