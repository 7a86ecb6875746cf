/// Errors that can occur while reading raw manifest text.
///
/// Header *values* never produce errors: malformed clauses, unparseable
/// versions, and unreachable nested archives are all recovered locally by
/// substituting an empty or absent field. Only the outer text layer (a
/// manifest that is not `Name: value` lines, or a failing reader) surfaces
/// here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A non-blank manifest line had no `:` separator.
    #[error("malformed manifest line {line}: {text:?}")]
    ManifestParse { line: usize, text: String },

    /// I/O error from a caller-supplied manifest reader.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
