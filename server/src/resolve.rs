//! Module-name resolution.
//!
//! Maps a user-supplied module identifier to a file directly inside the
//! modules directory. This is the only security-relevant logic in the
//! server: a name that smells like path traversal is rejected before any
//! filesystem access, and rejections are reported as `NotFound` so a prober
//! cannot distinguish a blocked name from a missing module.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ModuleError;

/// Resolve a requested module name to `(normalized_name, file_path)`.
///
/// The `.json` suffix is optional in the request; the normalized name always
/// carries it and doubles as the cache key.
pub fn resolve(modules_dir: &Path, name: &str) -> Result<(String, PathBuf), ModuleError> {
    if !is_safe_name(name) {
        warn!(module = %name, "rejected module name");
        return Err(ModuleError::NotFound {
            name: name.to_string(),
        });
    }

    let file_name = if name.ends_with(".json") {
        name.to_string()
    } else {
        format!("{name}.json")
    };

    let path = modules_dir.join(&file_name);
    // `is_safe_name` already forbids separators and `..`, so the join cannot
    // escape; keep the containment check as the load-bearing guarantee.
    if path.parent() != Some(modules_dir) {
        warn!(module = %name, "resolved path escapes modules directory");
        return Err(ModuleError::NotFound {
            name: name.to_string(),
        });
    }

    Ok((file_name, path))
}

/// A name is safe when it is a plain file name: non-empty, no path
/// separators, no parent-directory references, and a non-empty stem.
fn is_safe_name(name: &str) -> bool {
    if name.is_empty() || name == ".json" {
        return false;
    }
    if name.contains('/') || name.contains('\\') {
        return false;
    }
    if name.contains("..") {
        return false;
    }
    true
}
