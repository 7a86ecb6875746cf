//! Public package extraction from export headers.
//!
//! Two header styles declare public packages. The OSGi clause grammar
//! (`Export-Package: org.demo.api;uses:="...";version=1.0, org.demo.spi`)
//! names plain packages; the NetBeans declaration style
//! (`OpenIDE-Module-Public-Packages: org.demo.api.*, org.demo.spi.**`)
//! marks each entry with a wildcard, where `**` covers subpackages. Both
//! produce the same ordered descriptor sequence.

use serde::Serialize;

use crate::clause::{split_clause, split_clauses};

/// One exported package, in header order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageExport {
    /// Dotted package name.
    pub package_name: String,
    /// Whether subpackages are exported too (the `**` declaration form).
    pub is_recursive: bool,
}

/// Extract exported packages from a clause-grammar header value
/// (`Export-Package` / `Import-Package` style).
///
/// The primary value of each clause is the package name; `uses` and
/// `version` attributes are consumed by the tokenizer but not surfaced.
/// Clause order is preserved exactly.
pub fn extract(header_value: &str) -> Vec<PackageExport> {
    split_clauses(header_value)
        .iter()
        .map(|clause| {
            let clause = split_clause(clause);
            let (package_name, is_recursive) = strip_wildcard(&clause.primary_value);
            PackageExport {
                package_name: package_name.to_string(),
                is_recursive,
            }
        })
        .filter(|export| !export.package_name.is_empty())
        .collect()
}

/// Extract exported packages from a declared-public-packages header value
/// (`OpenIDE-Module-Public-Packages` style).
///
/// Entries end in `.*` (the package itself) or `.**` (the package and its
/// subpackages). A lone `-` declares that nothing is public.
pub fn extract_declared(header_value: &str) -> Vec<PackageExport> {
    if header_value.trim() == "-" {
        return Vec::new();
    }
    extract(header_value)
}

/// Split a trailing wildcard marker off a package declaration.
fn strip_wildcard(name: &str) -> (&str, bool) {
    if let Some(base) = name.strip_suffix(".**") {
        (base, true)
    } else if let Some(base) = name.strip_suffix(".*") {
        (base, false)
    } else {
        (name, false)
    }
}
