//! Generation entry point.
//! Sequences kind inference, configuration resolution, the template existence
//! check and tree rendering for a single destination.

use log::debug;
use std::path::{Path, PathBuf};

use crate::{
    config::prepare_params,
    error::{Error, Result},
    kind::{resolve_kind, KindSpec},
    processor::generate_tree,
    renderer::{Fields, TemplateRenderer},
};

/// Everything needed to generate one destination.
#[derive(Debug, Clone)]
pub struct Request {
    /// Path of the new file or directory.
    pub destination: PathBuf,
    /// Explicit kind; inferred from the destination suffix when `None`.
    pub kind: Option<String>,
    /// YAML configuration file.
    pub config_path: PathBuf,
    /// Field values overriding configured defaults.
    pub overrides: Fields,
}

impl Request {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(destination: P, config_path: Q) -> Self {
        Self {
            destination: destination.as_ref().to_path_buf(),
            kind: None,
            config_path: config_path.as_ref().to_path_buf(),
            overrides: Fields::new(),
        }
    }

    pub fn with_kind<S: Into<String>>(mut self, kind: S) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_field<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }
}

/// Generates a file or directory from the template registered for its kind.
///
/// # Flow
/// 1. Takes the destination basename
/// 2. Resolves the kind (explicit or inferred from the suffix)
/// 3. Resolves the template path and fields from the configuration
/// 4. Checks that the template exists
/// 5. Renders the template onto the destination
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Every created path, destination first
pub fn generate(request: &Request, renderer: &dyn TemplateRenderer) -> Result<Vec<PathBuf>> {
    let destination = request.destination.display().to_string();
    let basename = request
        .destination
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::InvalidDestinationError { destination: destination.clone() })?;

    let kind = resolve_kind(KindSpec::new(request.kind.clone(), basename), &destination)?;
    debug!("Generating {} as kind `{}`", destination, kind);

    let params = prepare_params(basename, &kind, &request.config_path, &request.overrides)?;

    if !params.template_path.exists() {
        return Err(Error::TemplateNotFoundError {
            destination,
            kind,
            template_path: params.template_path.display().to_string(),
        });
    }

    generate_tree(&request.destination, &params.template_path, &params.fields, renderer)
}
