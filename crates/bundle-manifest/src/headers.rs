//! Logical header map for module manifests.
//!
//! A manifest is a sequence of RFC822-style `Name: value` lines. A physical
//! line beginning with a single space continues the previous header's value
//! and is folded into it here, so the rest of the pipeline only ever sees one
//! logical value per header. Header names are matched case-insensitively, as
//! archive tooling treats them.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Module identity header used by OSGi-style bundles.
pub const BUNDLE_SYMBOLIC_NAME: &str = "Bundle-SymbolicName";
/// Module identity header used by NetBeans-style modules (`name/release`).
pub const OPENIDE_MODULE: &str = "OpenIDE-Module";
/// Dotted bundle version, optionally with a 4th qualifier segment.
pub const BUNDLE_VERSION: &str = "Bundle-Version";
/// Fallback specification version when no `Bundle-Version` is present.
pub const OPENIDE_MODULE_SPECIFICATION_VERSION: &str = "OpenIDE-Module-Specification-Version";
/// Explicit implementation version; overrides the one derived from the bundle version.
pub const OPENIDE_MODULE_IMPLEMENTATION_VERSION: &str = "OpenIDE-Module-Implementation-Version";
/// Relative resource path of the module's layer file.
pub const OPENIDE_MODULE_LAYER: &str = "OpenIDE-Module-Layer";
/// Exported packages, clause grammar.
pub const EXPORT_PACKAGE: &str = "Export-Package";
/// Declared public packages, `pkg.*` / `pkg.**` / `-` convention.
pub const OPENIDE_MODULE_PUBLIC_PACKAGES: &str = "OpenIDE-Module-Public-Packages";
/// Imported packages, clause grammar.
pub const IMPORT_PACKAGE: &str = "Import-Package";
/// Required bundles, clause grammar with optional `bundle-version` ranges.
pub const REQUIRE_BUNDLE: &str = "Require-Bundle";
/// Inter-module dependencies, `name/release` with optional `= impl` / `> spec` decoration.
pub const OPENIDE_MODULE_MODULE_DEPENDENCIES: &str = "OpenIDE-Module-Module-Dependencies";
/// Required capability tokens.
pub const OPENIDE_MODULE_REQUIRES: &str = "OpenIDE-Module-Requires";
/// Extra provided capability tokens.
pub const OPENIDE_MODULE_PROVIDES: &str = "OpenIDE-Module-Provides";
/// Relative paths of nested archives whose manifests are absorbed.
pub const CLASS_PATH: &str = "Class-Path";

/// Case-insensitive map of logical header name to logical (folded) value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    /// Keyed by the ASCII-lowercased header name.
    entries: HashMap<String, String>,
}

impl HeaderMap {
    /// Create an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw manifest text into a header map.
    ///
    /// Continuation lines (leading single space) are folded into the previous
    /// header's value. Blank lines end the main section; anything after the
    /// first blank line (per-entry sections) is ignored. A non-blank line
    /// with no `:` separator is an error.
    pub fn parse(text: &str) -> Result<Self> {
        let mut map = Self::new();
        let mut current: Option<String> = None;

        for (idx, raw_line) in text.lines().enumerate() {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            if line.is_empty() {
                break;
            }
            if let Some(rest) = line.strip_prefix(' ') {
                let Some(ref name) = current else {
                    return Err(Error::ManifestParse {
                        line: idx + 1,
                        text: line.to_string(),
                    });
                };
                if let Some(value) = map.entries.get_mut(name) {
                    value.push_str(rest);
                }
                continue;
            }
            let Some((name, value)) = line.split_once(':') else {
                return Err(Error::ManifestParse {
                    line: idx + 1,
                    text: line.to_string(),
                });
            };
            let key = name.trim().to_ascii_lowercase();
            map.entries
                .insert(key.clone(), value.trim_start().to_string());
            current = Some(key);
        }

        Ok(map)
    }

    /// Insert a header, replacing any previous value for the same name.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Look up a header value by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Whether no headers are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of headers present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<N: AsRef<str>, V: Into<String>> FromIterator<(N, V)> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}
