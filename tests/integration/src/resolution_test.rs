//! End-to-end manifest resolution tests.
//!
//! These exercise the complete flow over a temporary-directory sandbox:
//! manifest text on disk -> header folding -> descriptor resolution ->
//! nested-archive absorption through a filesystem-backed source.

use std::fs;
use std::path::PathBuf;

use bundle_manifest::{
    HeaderMap, ManifestDescriptor, NestedManifestSource, Resolver, headers,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// A [`NestedManifestSource`] that maps each `Class-Path` entry to a `.MF`
/// file next to it in a sandbox directory. This stands in for the archive
/// layer that would normally extract `META-INF/MANIFEST.MF` from a jar.
struct SandboxSource {
    root: PathBuf,
}

impl NestedManifestSource for SandboxSource {
    fn open_manifest(&self, path: &str) -> Option<HeaderMap> {
        let text = fs::read_to_string(self.root.join(path).with_extension("MF")).ok()?;
        HeaderMap::parse(&text).ok()
    }
}

fn sandbox() -> (TempDir, SandboxSource) {
    let temp = TempDir::new().unwrap();
    let source = SandboxSource {
        root: temp.path().to_path_buf(),
    };
    (temp, source)
}

#[test]
fn test_full_descriptor_from_manifest_text() {
    let text = "Manifest-Version: 1.0\n\
                Bundle-SymbolicName: org.netbeans.send-opts;singleton:=true\n\
                Bundle-Version: 1.9.7.Prelude\n\
                OpenIDE-Module-Layer: org/netbeans/sendopts/layer.xml\n\
                Export-Package: org.netbeans.sendopts.api,\n \
                org.netbeans.sendopts.spi;uses:=\"org.netbeans.sendopts.api\"\n\
                Require-Bundle: test.core,test.tasks;bundle-version=\"[3.0.0,4.0.0)\"\n\
                Import-Package: actual.api, javax.swing\n";

    let descriptor = Resolver::new().resolve_manifest_text(text, None).unwrap();

    assert_eq!(descriptor.code_name_base(), "org.netbeans.send_opts");
    assert_eq!(
        descriptor.specification_version().unwrap().to_string(),
        "1.9.7"
    );
    assert_eq!(descriptor.implementation_version(), Some("1.9.7.Prelude"));
    assert_eq!(
        descriptor.layer_path(),
        Some("org/netbeans/sendopts/layer.xml")
    );
    assert_eq!(
        descriptor
            .public_packages()
            .iter()
            .map(|p| p.package_name.as_str())
            .collect::<Vec<_>>(),
        vec!["org.netbeans.sendopts.api", "org.netbeans.sendopts.spi"]
    );
    assert_eq!(
        descriptor.required_tokens(),
        &["test.core", "test.tasks", "actual.api"]
    );
}

#[test]
fn test_wrapper_absorbs_nested_archive_from_sandbox() {
    let (temp, source) = sandbox();
    fs::create_dir(temp.path().join("lib")).unwrap();
    fs::write(
        temp.path().join("lib/container.MF"),
        "Manifest-Version: 1.0\n\
         Bundle-SymbolicName: super.container\n\
         Export-Package: super.container.features\n",
    )
    .unwrap();

    let wrapper = "Manifest-Version: 1.0\n\
                   OpenIDE-Module-Provides: org.osgi.framework.launch.FrameworkFactory\n\
                   Class-Path: lib/container.jar\n";
    let descriptor = Resolver::new()
        .resolve_manifest_text(wrapper, Some(&source))
        .unwrap();

    let tokens: std::collections::HashSet<&str> = descriptor
        .provided_tokens()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(
        tokens,
        [
            "org.osgi.framework.launch.FrameworkFactory",
            "super.container",
            "super.container.features",
        ]
        .into_iter()
        .collect()
    );
}

#[test]
fn test_transitive_absorption_in_class_path_order() {
    let (temp, source) = sandbox();
    fs::write(
        temp.path().join("first.MF"),
        "Bundle-SymbolicName: nested.first\nClass-Path: inner.jar\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("second.MF"),
        "Bundle-SymbolicName: nested.second\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("inner.MF"),
        "Bundle-SymbolicName: nested.inner\nOpenIDE-Module-Provides: inner.capability\n",
    )
    .unwrap();

    let root = "Bundle-SymbolicName: root.module\nClass-Path: first.jar second.jar\n";
    let descriptor = Resolver::new()
        .resolve_manifest_text(root, Some(&source))
        .unwrap();

    assert_eq!(
        descriptor.provided_tokens(),
        &[
            "root.module",
            "nested.first",
            "nested.inner",
            "inner.capability",
            "nested.second",
        ]
    );
}

#[test]
fn test_unreadable_nested_entries_are_skipped() {
    let (temp, source) = sandbox();
    fs::write(
        temp.path().join("present.MF"),
        "Bundle-SymbolicName: is.present\n",
    )
    .unwrap();

    let root = "Bundle-SymbolicName: root.module\nClass-Path: missing.jar present.jar\n";
    let descriptor = Resolver::new()
        .resolve_manifest_text(root, Some(&source))
        .unwrap();

    assert_eq!(descriptor.provided_tokens(), &["root.module", "is.present"]);
}

#[test]
fn test_descriptor_serializes_to_json() {
    let map: HeaderMap = [
        (headers::BUNDLE_SYMBOLIC_NAME, "org.demo.core"),
        (headers::BUNDLE_VERSION, "2.1"),
        (headers::EXPORT_PACKAGE, "org.demo.api"),
    ]
    .into_iter()
    .collect();
    let descriptor = ManifestDescriptor::from_headers(&map);

    let json = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(json["code_name_base"], "org.demo.core");
    assert_eq!(json["public_packages"][0]["package_name"], "org.demo.api");
    assert_eq!(json["public_packages"][0]["is_recursive"], false);
}

#[test]
fn test_resolution_is_idempotent_through_the_sandbox() {
    let (temp, source) = sandbox();
    fs::write(
        temp.path().join("dep.MF"),
        "Bundle-SymbolicName: dep.module\n",
    )
    .unwrap();

    let root = "Bundle-SymbolicName: root.module\nClass-Path: dep.jar\n";
    let resolver = Resolver::new();
    let first = resolver.resolve_manifest_text(root, Some(&source)).unwrap();
    let second = resolver.resolve_manifest_text(root, Some(&source)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unrecognized_headers_are_ignored() {
    let text = "Manifest-Version: 1.0\n\
                Created-By: 17.0.2 (Homebrew)\n\
                Bundle-SymbolicName: org.demo.core\n\
                Some-Custom-Header: whatever; this=is; not=parsed\n";
    let descriptor = Resolver::new().resolve_manifest_text(text, None).unwrap();
    assert_eq!(descriptor.code_name_base(), "org.demo.core");
    assert_eq!(descriptor.provided_tokens(), &["org.demo.core"]);
    assert!(descriptor.required_tokens().is_empty());
}
