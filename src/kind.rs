//! Kind inference.
//! A kind names a template family. It is either given explicitly or taken
//! from the destination basename: everything after the first `.`, so compound
//! suffixes like `component.tsx` survive intact.

use crate::error::{Error, Result};

/// How the kind of a new file is determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindSpec {
    /// Kind supplied by the caller (`--kind`).
    Explicit(String),
    /// Kind to be inferred from the destination basename.
    Inferred { basename: String },
}

impl KindSpec {
    /// Builds the spec from an optional explicit kind and the destination basename.
    pub fn new(explicit: Option<String>, basename: &str) -> Self {
        match explicit {
            Some(kind) => KindSpec::Explicit(kind),
            None => KindSpec::Inferred { basename: basename.to_string() },
        }
    }
}

/// Returns the suffix after the first `.` of `basename`, if it is non-empty.
pub fn infer_kind(basename: &str) -> Option<&str> {
    basename.split_once('.').map(|(_, suffix)| suffix).filter(|suffix| !suffix.is_empty())
}

/// Returns the part of `basename` before its first `.`.
pub fn stem(basename: &str) -> &str {
    basename.split_once('.').map_or(basename, |(stem, _)| stem)
}

/// Resolves the effective kind.
///
/// # Arguments
/// * `spec` - Explicit kind or basename to infer from
/// * `destination` - Destination path, used in the error message
///
/// # Errors
/// * `Error::InvalidKindError` if the explicit kind is empty
/// * `Error::InvalidDestinationError` if the basename has no suffix to infer from
pub fn resolve_kind(spec: KindSpec, destination: &str) -> Result<String> {
    match spec {
        KindSpec::Explicit(kind) if kind.is_empty() => {
            Err(Error::InvalidKindError { destination: destination.to_string() })
        }
        KindSpec::Explicit(kind) => Ok(kind),
        KindSpec::Inferred { basename } => infer_kind(&basename)
            .map(str::to_string)
            .ok_or_else(|| Error::InvalidDestinationError { destination: destination.to_string() }),
    }
}
