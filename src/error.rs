//! Error handling for fromtemplate.
//! Defines the error taxonomy and the result type used throughout the crate.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Custom error types for fromtemplate operations.
///
/// Every variant carries enough context (destination, kind or offending path)
/// to be shown to the user as-is.
#[derive(Error, Debug)]
pub enum Error {
    /// The destination has no inferable suffix and no explicit kind was given.
    #[error("{destination} does not have a file suffix. You must provide the `--kind` argument.")]
    InvalidDestinationError { destination: String },

    /// An explicit kind was given but is empty.
    #[error("Error generating {destination}. The `--kind` argument must not be empty.")]
    InvalidKindError { destination: String },

    /// The configuration file is present but unparsable or structurally invalid.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The resolved template path does not exist for the given kind.
    #[error("Error generating {destination}. No template exists for kind `{kind}` (looked in '{template_path}').")]
    TemplateNotFoundError {
        destination: String,
        kind: String,
        template_path: String,
    },

    /// A template entry could not be turned into a destination entry.
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Represents errors that occur during file system operations
    #[error("IO error on '{path}': {source}.")]
    IoError {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Wraps an [`io::Error`] together with the path it happened on.
    pub fn io<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Error::IoError { path: path.as_ref().display().to_string(), source }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    log::debug!("{:?}", err);
    eprintln!("{}", err);
    std::process::exit(1);
}
