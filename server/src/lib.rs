//! HTTP server for voice-agent conversation modules.
//!
//! Modules are JSON documents in a single flat directory. The server loads
//! them lazily through a read-through in-memory cache and exposes them over a
//! small JSON API, plus one mutating endpoint that clears the cache so edits
//! on disk become visible.
//!
//! - **[`resolve`]**: module-name validation (the only security-relevant
//!   logic; rejects path traversal).
//! - **[`cache`]**: read-through cache over the modules directory.
//! - **[`routes`]**: the HTTP surface.

pub mod cache;
pub mod error;
pub mod logging;
pub mod resolve;
pub mod routes;
pub mod state;
