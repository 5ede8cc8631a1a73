//! Shared application state handed to request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::ModuleCache;

/// Cloneable handle shared by all request handlers.
///
/// The cache is owned here and injected into the router; its lifecycle is
/// tied to process start and the reload endpoint, with no global state.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ModuleCache>,
}

impl AppState {
    pub fn new(modules_dir: PathBuf) -> Self {
        Self {
            cache: Arc::new(ModuleCache::new(modules_dir)),
        }
    }
}
