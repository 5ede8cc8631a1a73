//! Read-through cache over the modules directory.
//!
//! Entries are created on first access and cleared wholesale by [`ModuleCache::reload`].
//! The module set is small and static, so there is no eviction or per-entry
//! expiry; a cached value stays byte-equivalent to the on-disk JSON as of the
//! most recent load for that name.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::ModuleError;
use crate::resolve::resolve;

/// Cache mapping normalized module names to parsed JSON values.
///
/// Shared across request handlers behind an `Arc`; reads dominate, so a
/// plain `RwLock` around the map is sufficient.
pub struct ModuleCache {
    modules_dir: PathBuf,
    entries: RwLock<HashMap<String, Value>>,
}

impl ModuleCache {
    pub fn new(modules_dir: PathBuf) -> Self {
        Self {
            modules_dir,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn modules_dir(&self) -> &Path {
        &self.modules_dir
    }

    /// Get a module's JSON, loading and caching it on first access.
    pub fn get(&self, name: &str) -> Result<Value, ModuleError> {
        let (key, path) = resolve(&self.modules_dir, name)?;

        if let Some(value) = self.entries.read().expect("cache lock").get(&key) {
            debug!(module = %key, "cache hit");
            return Ok(value.clone());
        }

        let value = load_module(&key, &path)?;
        debug!(module = %key, "loaded from disk");
        self.entries
            .write()
            .expect("cache lock")
            .insert(key, value.clone());
        Ok(value)
    }

    /// Drop every cached entry. Returns how many were dropped.
    pub fn reload(&self) -> usize {
        let mut entries = self.entries.write().expect("cache lock");
        let dropped = entries.len();
        entries.clear();
        info!(dropped, "module cache cleared");
        dropped
    }

    /// Number of modules currently held in memory.
    pub fn cached_count(&self) -> usize {
        self.entries.read().expect("cache lock").len()
    }

    /// File names of all `*.json` modules on disk, sorted. Lists the
    /// directory, not the cache.
    pub fn list(&self) -> Result<Vec<String>, ModuleError> {
        if !self.modules_dir.exists() {
            return Err(ModuleError::NotFound {
                name: self.modules_dir.display().to_string(),
            });
        }

        let entries = fs::read_dir(&self.modules_dir).map_err(|source| ModuleError::Io {
            name: self.modules_dir.display().to_string(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|e| e == "json") {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Count of `*.json` modules on disk; `0` when the directory is missing
    /// so health checks never fail on an empty deployment.
    pub fn available(&self) -> usize {
        self.list().map(|names| names.len()).unwrap_or(0)
    }
}

fn load_module(name: &str, path: &Path) -> Result<Value, ModuleError> {
    if !path.exists() {
        return Err(ModuleError::NotFound {
            name: name.to_string(),
        });
    }
    let contents = fs::read_to_string(path).map_err(|source| ModuleError::Io {
        name: name.to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ModuleError::Parse {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;

    use super::*;

    fn cache_with_module(name: &str, value: &Value) -> (tempfile::TempDir, ModuleCache) {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join(name), value.to_string()).expect("write module");
        let cache = ModuleCache::new(temp.path().to_path_buf());
        (temp, cache)
    }

    #[test]
    fn get_returns_parsed_file_contents() {
        let value = json!({"id": "greeting", "content": "Hello there"});
        let (_temp, cache) = cache_with_module("greeting.json", &value);

        assert_eq!(cache.get("greeting").expect("get"), value);
        assert_eq!(cache.get("greeting.json").expect("get"), value);
        assert_eq!(cache.cached_count(), 1);
    }

    #[test]
    fn get_serves_cached_value_until_reload() {
        let original = json!({"content": "v1"});
        let (temp, cache) = cache_with_module("m.json", &original);
        assert_eq!(cache.get("m").expect("get"), original);

        // Edit on disk; cached value must stay stale until reload.
        let edited = json!({"content": "v2"});
        fs::write(temp.path().join("m.json"), edited.to_string()).expect("rewrite");
        assert_eq!(cache.get("m").expect("get"), original);

        assert_eq!(cache.reload(), 1);
        assert_eq!(cache.get("m").expect("get"), edited);
    }

    #[test]
    fn missing_module_is_not_found() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cache = ModuleCache::new(temp.path().to_path_buf());
        let err = cache.get("missing").expect_err("missing");
        assert!(matches!(err, ModuleError::NotFound { .. }));
    }

    #[test]
    fn malformed_json_is_parse_error_and_not_cached() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("bad.json"), "{not json").expect("write");
        let cache = ModuleCache::new(temp.path().to_path_buf());

        let err = cache.get("bad").expect_err("parse");
        assert!(matches!(err, ModuleError::Parse { .. }));
        assert_eq!(cache.cached_count(), 0);
    }

    #[test]
    fn list_is_sorted_and_json_only() {
        let temp = tempfile::tempdir().expect("tempdir");
        for name in ["b.json", "a.json", "notes.txt"] {
            fs::write(temp.path().join(name), "{}").expect("write");
        }
        let cache = ModuleCache::new(temp.path().to_path_buf());

        assert_eq!(cache.list().expect("list"), vec!["a.json", "b.json"]);
        assert_eq!(cache.available(), 2);
    }

    #[test]
    fn list_missing_directory_is_not_found_but_available_is_zero() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cache = ModuleCache::new(temp.path().join("nope"));
        assert!(matches!(
            cache.list().expect_err("list"),
            ModuleError::NotFound { .. }
        ));
        assert_eq!(cache.available(), 0);
    }

    #[test]
    fn traversal_never_reads_outside_modules_dir() {
        let temp = tempfile::tempdir().expect("tempdir");
        let outside = temp.path().join("secret.json");
        fs::write(&outside, "{\"leak\": true}").expect("write");

        let modules_dir = temp.path().join("modules");
        fs::create_dir(&modules_dir).expect("mkdir");
        let cache = ModuleCache::new(modules_dir);

        let err = cache.get("../secret").expect_err("traversal");
        assert!(matches!(err, ModuleError::NotFound { .. }));
        assert_eq!(cache.cached_count(), 0);
    }
}
