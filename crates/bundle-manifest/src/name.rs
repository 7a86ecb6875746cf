//! Symbolic-name normalization.
//!
//! The module system keys its dependency graph on a canonical code-name-base.
//! An OSGi `Bundle-SymbolicName` may carry a `singleton:=true` directive and
//! dashes; a NetBeans `OpenIDE-Module` value may carry a `/release` suffix.
//! Both normalize to the same shape: release suffix stripped, every `-`
//! replaced with `_`, everything else (including case) untouched.

use crate::clause::HeaderClause;

/// Normalize the primary value of a module-identity clause into a
/// code-name-base.
///
/// Attributes such as `singleton` are ignored (the tokenizer already
/// separated them from the primary value). A `/N` release suffix is dropped,
/// then every `-` becomes `_`.
///
/// `org.netbeans.send-opts` becomes `org.netbeans.send_opts`.
pub fn normalize_symbolic_name(clause: &HeaderClause) -> String {
    strip_release(&clause.primary_value).replace('-', "_")
}

/// Drop a trailing `/release` designation, as in `my.module/3`.
fn strip_release(name: &str) -> &str {
    match name.split_once('/') {
        Some((base, _)) => base,
        None => name,
    }
}
