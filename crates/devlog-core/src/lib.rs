//! Core types and utilities for the DevLog client
//!
//! # Modules
//!
//! - `config`: Client configuration (default backend URL, storage keys)
//! - `error`: Error types and Result alias
//! - `session`: Session store with write-through persistence
//! - `storage`: Key-value persistence slots
//! - `types`: Project records and wire payloads

pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod types;

// Re-exports
pub use config::ClientConfig;
pub use error::{Action, Error, Result};
pub use session::{AuthState, Session, SessionStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use types::*;
