//! Derivation of provided and required capability tokens.
//!
//! The module system matches every required token of a module against the
//! union of provided tokens across the whole module set before loading it.
//! Provided tokens come from the module's own identity, its public packages,
//! and explicit capability declarations; required tokens come from the
//! various dependency headers, with standard-library packages filtered out
//! of import requirements because the runtime always supplies them.

use crate::clause::{split_clause, split_clauses};
use crate::headers::{
    HeaderMap, IMPORT_PACKAGE, OPENIDE_MODULE_MODULE_DEPENDENCIES, OPENIDE_MODULE_PROVIDES,
    OPENIDE_MODULE_REQUIRES, REQUIRE_BUNDLE,
};
use crate::name::normalize_symbolic_name;
use crate::packages::PackageExport;

/// Package prefixes assumed present on the runtime's boot classpath.
const DEFAULT_BOOT_PREFIXES: &[&str] = &[
    "java.",
    "javax.",
    "org.omg.",
    "org.w3c.dom",
    "org.xml.sax",
    "sun.",
];

/// Predicate for packages that never become required tokens because the
/// boot classpath always provides them.
///
/// The default set covers the JDK namespaces; callers embedding a different
/// runtime can supply their own prefixes.
#[derive(Debug, Clone)]
pub struct BootPackages {
    prefixes: Vec<String>,
}

impl Default for BootPackages {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_BOOT_PREFIXES.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

impl BootPackages {
    /// A predicate matching the given package-name prefixes instead of the
    /// default JDK set.
    pub fn with_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// A predicate that excludes nothing.
    pub fn none() -> Self {
        Self { prefixes: Vec::new() }
    }

    /// Whether the boot classpath is assumed to provide this package.
    pub fn contains(&self, package: &str) -> bool {
        self.prefixes.iter().any(|prefix| package.starts_with(prefix))
    }
}

/// Provided tokens, in order: code-name-base (when present), public package
/// names in header order, then explicit capability declarations in header
/// order. No deduplication; nested-archive tokens are appended later by the
/// resolver.
///
/// The `cnb.`-prefixed self-identity token is derivable from the
/// code-name-base and deliberately not stored here.
pub fn derive_provided(
    code_name_base: &str,
    public_packages: &[PackageExport],
    headers: &HeaderMap,
) -> Vec<String> {
    let mut provided = Vec::new();
    if !code_name_base.is_empty() {
        provided.push(code_name_base.to_string());
    }
    for export in public_packages {
        provided.push(export.package_name.clone());
    }
    if let Some(value) = headers.get(OPENIDE_MODULE_PROVIDES) {
        for clause in split_clauses(value) {
            provided.push(split_clause(&clause).primary_value);
        }
    }
    provided
}

/// Required tokens, in order: `Require-Bundle` entries (normalized like
/// symbolic names, version ranges discarded), inter-module dependency
/// entries, explicit token requirements, then `Import-Package` entries that
/// survive the boot-package predicate. Header order is kept within each
/// group; no deduplication.
pub fn derive_required(headers: &HeaderMap, boot_packages: &BootPackages) -> Vec<String> {
    let mut required = Vec::new();

    if let Some(value) = headers.get(REQUIRE_BUNDLE) {
        for clause in split_clauses(value) {
            // A bundle-version range may be attached; parsing it further than
            // the tokenizer already did is out of scope.
            required.push(normalize_symbolic_name(&split_clause(&clause)));
        }
    }

    if let Some(value) = headers.get(OPENIDE_MODULE_MODULE_DEPENDENCIES) {
        for clause in split_clauses(value) {
            let name = dependency_name(&split_clause(&clause).primary_value);
            if !name.is_empty() {
                required.push(name.replace('-', "_"));
            }
        }
    }

    if let Some(value) = headers.get(OPENIDE_MODULE_REQUIRES) {
        for clause in split_clauses(value) {
            required.push(split_clause(&clause).primary_value);
        }
    }

    if let Some(value) = headers.get(IMPORT_PACKAGE) {
        for clause in split_clauses(value) {
            let package = split_clause(&clause).primary_value;
            if boot_packages.contains(&package) {
                continue;
            }
            required.push(package);
        }
    }

    required
}

/// The module name of an inter-module dependency entry, shorn of its
/// release designation (`/1` or `/1-2`) and comparison decoration
/// (`= impl-version`, `> spec-version`).
fn dependency_name(entry: &str) -> String {
    let entry = entry
        .split(['=', '>'])
        .next()
        .unwrap_or(entry)
        .trim();
    match entry.split_once('/') {
        Some((base, _)) => base.to_string(),
        None => entry.to_string(),
    }
}
