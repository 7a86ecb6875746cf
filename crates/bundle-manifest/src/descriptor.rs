//! Manifest descriptor resolution.
//!
//! [`Resolver`] is the entry point: it runs the identity, version, package,
//! and token stages over a header map, follows `Class-Path` references when
//! a [`NestedManifestSource`] is supplied, and hands back an immutable
//! [`ManifestDescriptor`]. Resolution is a pure, single-pass transformation;
//! a resolver holds configuration only and is safe to share across threads.

use std::collections::HashSet;

use serde::Serialize;

use crate::clause::{split_clause, split_clauses};
use crate::error::Result;
use crate::headers::{
    BUNDLE_SYMBOLIC_NAME, BUNDLE_VERSION, CLASS_PATH, EXPORT_PACKAGE, HeaderMap, OPENIDE_MODULE,
    OPENIDE_MODULE_IMPLEMENTATION_VERSION, OPENIDE_MODULE_LAYER, OPENIDE_MODULE_PUBLIC_PACKAGES,
    OPENIDE_MODULE_SPECIFICATION_VERSION,
};
use crate::name::normalize_symbolic_name;
use crate::nested::{NestedManifestSource, class_path_entries};
use crate::packages::{self, PackageExport};
use crate::tokens::{BootPackages, derive_provided, derive_required};
use crate::version::{self, SpecificationVersion};

/// Nested archives deeper than this are not followed. Class-Path chains in
/// real module sets are one or two levels; anything deeper is a sign of a
/// reference loop the source never guarded against.
const DEFAULT_MAX_NESTING_DEPTH: usize = 16;

/// The finished, read-only description of one module manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestDescriptor {
    code_name_base: String,
    specification_version: Option<SpecificationVersion>,
    implementation_version: Option<String>,
    layer_path: Option<String>,
    public_packages: Vec<PackageExport>,
    provided_tokens: Vec<String>,
    required_tokens: Vec<String>,
}

impl ManifestDescriptor {
    /// Resolve a header map with the default configuration and no nested
    /// archive access.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Resolver::new().resolve(headers, None)
    }

    /// Normalized module identifier; empty when no identity header was
    /// present. Contains no `-`.
    pub fn code_name_base(&self) -> &str {
        &self.code_name_base
    }

    /// Truncated `major.minor.micro` specification version.
    pub fn specification_version(&self) -> Option<&SpecificationVersion> {
        self.specification_version.as_ref()
    }

    /// Full version string including any qualifier segment.
    pub fn implementation_version(&self) -> Option<&str> {
        self.implementation_version.as_deref()
    }

    /// Relative resource path of the module's layer, verbatim.
    pub fn layer_path(&self) -> Option<&str> {
        self.layer_path.as_deref()
    }

    /// Exported packages in header order; duplicates permitted.
    pub fn public_packages(&self) -> &[PackageExport] {
        &self.public_packages
    }

    /// Provided capability tokens: identity, packages, explicit provides,
    /// then anything absorbed from nested archives. Insertion-ordered, not
    /// deduplicated.
    pub fn provided_tokens(&self) -> &[String] {
        &self.provided_tokens
    }

    /// Required capability tokens in header order.
    pub fn required_tokens(&self) -> &[String] {
        &self.required_tokens
    }

    /// The implicit `cnb.`-prefixed self-identity token.
    ///
    /// Every module trivially satisfies a dependency on its own identity, so
    /// this token is derivable on demand rather than stored among
    /// [`provided_tokens`](Self::provided_tokens).
    pub fn self_identity_token(&self) -> String {
        format!("cnb.{}", self.code_name_base)
    }
}

/// Configurable manifest resolver.
///
/// Stateless apart from configuration; `resolve` allocates fresh structures
/// per call and may be invoked concurrently on different inputs.
#[derive(Debug, Clone)]
pub struct Resolver {
    boot_packages: BootPackages,
    max_nesting_depth: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            boot_packages: BootPackages::default(),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the boot-package exclusion predicate.
    pub fn with_boot_packages(mut self, boot_packages: BootPackages) -> Self {
        self.boot_packages = boot_packages;
        self
    }

    /// Cap nested-archive recursion at `depth` levels.
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Resolve a header map into a descriptor.
    ///
    /// When `source` is supplied and a `Class-Path` header is present, each
    /// referenced archive's manifest is resolved recursively and its
    /// provided tokens appended after this module's own, in `Class-Path`
    /// order. Missing archives are skipped.
    pub fn resolve(
        &self,
        headers: &HeaderMap,
        source: Option<&dyn NestedManifestSource>,
    ) -> ManifestDescriptor {
        let mut visited = HashSet::new();
        self.resolve_inner(headers, source, 0, &mut visited)
    }

    /// Resolve raw manifest text, folding continuation lines first.
    ///
    /// This is the composition point for callers that located the manifest
    /// inside an archive themselves; extracting the entry's bytes is their
    /// concern, interpreting them is ours.
    pub fn resolve_manifest_text(
        &self,
        text: &str,
        source: Option<&dyn NestedManifestSource>,
    ) -> Result<ManifestDescriptor> {
        let headers = HeaderMap::parse(text)?;
        Ok(self.resolve(&headers, source))
    }

    /// Resolve a manifest handed over as a byte stream, e.g. an archive
    /// entry the caller already opened.
    pub fn resolve_manifest_reader(
        &self,
        mut reader: impl std::io::Read,
        source: Option<&dyn NestedManifestSource>,
    ) -> Result<ManifestDescriptor> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.resolve_manifest_text(&text, source)
    }

    fn resolve_inner(
        &self,
        headers: &HeaderMap,
        source: Option<&dyn NestedManifestSource>,
        depth: usize,
        visited: &mut HashSet<String>,
    ) -> ManifestDescriptor {
        let code_name_base = self.resolve_identity(headers);
        let (specification_version, implementation_version) = self.resolve_versions(headers);
        let layer_path = headers.get(OPENIDE_MODULE_LAYER).map(str::to_string);
        let public_packages = resolve_public_packages(headers);

        let mut provided_tokens = derive_provided(&code_name_base, &public_packages, headers);
        let required_tokens = derive_required(headers, &self.boot_packages);

        if let Some(source) = source {
            if let Some(class_path) = headers.get(CLASS_PATH) {
                self.absorb_nested(class_path, source, depth, visited, &mut provided_tokens);
            }
        }

        ManifestDescriptor {
            code_name_base,
            specification_version,
            implementation_version,
            layer_path,
            public_packages,
            provided_tokens,
            required_tokens,
        }
    }

    fn resolve_identity(&self, headers: &HeaderMap) -> String {
        let raw = headers
            .get(BUNDLE_SYMBOLIC_NAME)
            .or_else(|| headers.get(OPENIDE_MODULE));
        let Some(raw) = raw else {
            return String::new();
        };
        split_clauses(raw)
            .first()
            .map(|clause| normalize_symbolic_name(&split_clause(clause)))
            .unwrap_or_default()
    }

    fn resolve_versions(
        &self,
        headers: &HeaderMap,
    ) -> (Option<SpecificationVersion>, Option<String>) {
        let raw = headers
            .get(BUNDLE_VERSION)
            .or_else(|| headers.get(OPENIDE_MODULE_SPECIFICATION_VERSION));
        let (specification, mut implementation) = match raw {
            Some(raw) => version::resolve(raw),
            None => (None, None),
        };
        // An explicitly declared implementation version wins over the one
        // derived from the bundle version.
        if let Some(explicit) = headers.get(OPENIDE_MODULE_IMPLEMENTATION_VERSION) {
            implementation = Some(explicit.to_string());
        }
        (specification, implementation)
    }

    fn absorb_nested(
        &self,
        class_path: &str,
        source: &dyn NestedManifestSource,
        depth: usize,
        visited: &mut HashSet<String>,
        provided_tokens: &mut Vec<String>,
    ) {
        if depth >= self.max_nesting_depth {
            tracing::warn!(depth, "nested archive chain too deep, not following");
            return;
        }
        for path in class_path_entries(class_path) {
            if !visited.insert(path.to_string()) {
                continue;
            }
            let Some(nested_headers) = source.open_manifest(path) else {
                tracing::debug!(path, "nested archive unreachable, skipping");
                continue;
            };
            let nested =
                self.resolve_inner(&nested_headers, Some(source), depth + 1, visited);
            provided_tokens.extend(nested.provided_tokens);
        }
    }
}

fn resolve_public_packages(headers: &HeaderMap) -> Vec<PackageExport> {
    if let Some(value) = headers.get(EXPORT_PACKAGE) {
        return packages::extract(value);
    }
    if let Some(value) = headers.get(OPENIDE_MODULE_PUBLIC_PACKAGES) {
        return packages::extract_declared(value);
    }
    Vec::new()
}
