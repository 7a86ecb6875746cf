//! Nested-archive manifest access.
//!
//! A module archive may reference further archives through its `Class-Path`
//! header; their manifests contribute provided tokens to the referencing
//! module. This module stays filesystem-agnostic: opening an archive entry
//! is delegated to a caller-supplied [`NestedManifestSource`], so the
//! resolver can be exercised with in-memory fixtures and the real archive
//! layer plugged in elsewhere.

use std::collections::HashMap;

use crate::headers::HeaderMap;

/// Supplier of nested-archive manifests, keyed by the relative path that
/// appeared in a `Class-Path` header.
///
/// Returning `None` means the archive is missing or unopenable; absorption
/// is best-effort and the resolver skips such entries silently.
pub trait NestedManifestSource {
    /// Open the manifest of the archive at `path`, if it exists and can be
    /// read.
    fn open_manifest(&self, path: &str) -> Option<HeaderMap>;
}

/// In-memory [`NestedManifestSource`] backed by a path → header map table.
///
/// Intended for tests and for callers that have already extracted every
/// manifest up front.
#[derive(Debug, Clone, Default)]
pub struct InMemoryManifestSource {
    manifests: HashMap<String, HeaderMap>,
}

impl InMemoryManifestSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the manifest for `path`, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<String>, headers: HeaderMap) {
        self.manifests.insert(path.into(), headers);
    }
}

impl NestedManifestSource for InMemoryManifestSource {
    fn open_manifest(&self, path: &str) -> Option<HeaderMap> {
        self.manifests.get(path).cloned()
    }
}

/// Split a `Class-Path` header value into archive paths.
///
/// Entries are separated by whitespace or commas; both separators occur in
/// hand-written manifests.
pub(crate) fn class_path_entries(value: &str) -> Vec<&str> {
    value
        .split([' ', '\t', ','])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}
