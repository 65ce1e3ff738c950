//! Persistence layer for session state.
//!
//! This module provides the key/value abstraction the session persists
//! through, along with the shipped backends. Values are opaque strings; the
//! session layer decides what is serialized into them and treats every write
//! as best-effort.
//!
//! # Modules
//!
//! - `backend`: key/value trait abstraction for backend implementations
//! - `json`: single-file JSON implementation with atomic writes
//! - `memory`: in-memory implementation for tests and bridging hosts
//! - `keys`: the well-known keys session state is stored under

pub mod backend;
pub mod json;
pub mod keys;
pub mod memory;

pub use backend::KeyValueStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
