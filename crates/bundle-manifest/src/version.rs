//! Version parsing and truncation.
//!
//! Bundle versions are dotted strings of up to three numeric segments plus an
//! optional free-form qualifier (`1.9.7.Prelude`). The specification version
//! is the numeric prefix truncated to at most three segments; the
//! implementation version retains the full original string whenever a
//! qualifier is present. These are not semver: `1.9` is a complete, valid
//! version and is reported literally, without zero padding.

use serde::Serialize;

/// A three-component specification version.
///
/// Missing trailing segments default to `0` numerically, but [`Display`]
/// renders the literal prefix actually present in the manifest (`"1.9"`
/// stays `"1.9"`).
///
/// [`Display`]: std::fmt::Display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecificationVersion {
    major: u32,
    minor: u32,
    micro: u32,
    /// The truncated dotted prefix as written.
    raw: String,
}

impl SpecificationVersion {
    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn micro(&self) -> u32 {
        self.micro
    }

    /// The dotted prefix as it appeared in the manifest.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for SpecificationVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Resolve a raw version header value into `(specification, implementation)`
/// versions.
///
/// The first three dot-separated segments must be non-negative integers; any
/// further segments form the qualifier. With a qualifier present the
/// implementation version is the entire original string; otherwise it equals
/// the specification string. A non-numeric segment among the first three
/// makes the whole version absent rather than partially parsed — a
/// misleading specification version is worse than none.
pub fn resolve(raw_version: &str) -> (Option<SpecificationVersion>, Option<String>) {
    let raw_version = raw_version.trim();
    if raw_version.is_empty() {
        return (None, None);
    }

    let segments: Vec<&str> = raw_version.split('.').collect();
    let numeric_count = segments.len().min(3);
    let mut parsed = [0u32; 3];
    for (i, segment) in segments.iter().take(numeric_count).copied().enumerate() {
        match segment.parse::<u32>() {
            Ok(n) => parsed[i] = n,
            Err(_) => {
                tracing::debug!(version = raw_version, segment, "discarding unparseable version");
                return (None, None);
            }
        }
    }

    let prefix = segments[..numeric_count].join(".");
    let spec = SpecificationVersion {
        major: parsed[0],
        minor: parsed[1],
        micro: parsed[2],
        raw: prefix.clone(),
    };
    let implementation = if segments.len() > 3 {
        raw_version.to_string()
    } else {
        prefix
    };

    (Some(spec), Some(implementation))
}
