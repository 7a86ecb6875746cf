//! Module manifest descriptor resolution.
//!
//! This crate parses the metadata headers of a deployable module archive
//! into a structured [`ManifestDescriptor`] and derives the two symbolic
//! token sets — provided and required capabilities — that a module-loading
//! system uses to order and satisfy cross-module dependencies.
//!
//! The header grammar is the loose OSGi/NetBeans mixture found in real
//! manifests: comma-separated clauses with semicolon-separated attributes,
//! quoted version ranges, dash-to-underscore identifier normalization, and
//! `Class-Path` references to nested archives whose manifests are absorbed
//! transitively. Parsing is best-effort throughout; hand-edited manifests
//! degrade to empty or absent fields rather than errors.
//!
//! # Example
//!
//! ```
//! use bundle_manifest::{HeaderMap, ManifestDescriptor, headers};
//!
//! let map: HeaderMap = [
//!     (headers::BUNDLE_SYMBOLIC_NAME, "org.demo.send-opts"),
//!     (headers::BUNDLE_VERSION, "1.9.7.Prelude"),
//!     (headers::EXPORT_PACKAGE, "org.demo.api, org.demo.spi"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let descriptor = ManifestDescriptor::from_headers(&map);
//! assert_eq!(descriptor.code_name_base(), "org.demo.send_opts");
//! assert_eq!(descriptor.specification_version().unwrap().to_string(), "1.9.7");
//! assert_eq!(descriptor.implementation_version(), Some("1.9.7.Prelude"));
//! assert_eq!(
//!     descriptor.provided_tokens(),
//!     &["org.demo.send_opts", "org.demo.api", "org.demo.spi"]
//! );
//! ```
//!
//! Reading bytes out of an archive container is not this crate's concern:
//! callers hand in either a pre-extracted [`HeaderMap`] or raw manifest
//! text, plus an optional [`NestedManifestSource`] for following
//! `Class-Path` references.

pub mod clause;
pub mod descriptor;
pub mod error;
pub mod headers;
pub mod name;
pub mod nested;
pub mod packages;
pub mod tokens;
pub mod version;

/// Well-known archive entry path where a manifest lives.
pub const MANIFEST_ENTRY_PATH: &str = "META-INF/MANIFEST.MF";

pub use clause::HeaderClause;
pub use descriptor::{ManifestDescriptor, Resolver};
pub use error::Error;
pub use headers::HeaderMap;
pub use nested::{InMemoryManifestSource, NestedManifestSource};
pub use packages::PackageExport;
pub use tokens::BootPackages;
pub use version::SpecificationVersion;
