//! Configuration handling for fromtemplate.
//! Loads the user's YAML configuration, which maps each kind to a template
//! location and default field values, and resolves the template path and
//! fields for one invocation.
//!
//! ```yaml
//! py:
//!   template_path: templates/module.py
//!   fields:
//!     author: Jane
//!     license: ~   # required, must be supplied with --field
//! ```

use crate::constants::{NAME_FIELD, TEMPLATES_DIR};
use crate::error::{Error, Result};
use crate::kind::stem;
use crate::renderer::Fields;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings for a single kind.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindConfig {
    /// File or directory to render. Defaults to `<config dir>/templates/<kind>`.
    #[serde(default)]
    pub template_path: Option<String>,

    /// Default field values. A `null` value marks the field as required.
    #[serde(default)]
    pub fields: IndexMap<String, Option<serde_yaml::Value>>,
}

/// Parsed configuration file.
#[derive(Debug)]
pub struct Config {
    /// Directory relative template paths are resolved against.
    pub root: PathBuf,
    pub kinds: IndexMap<String, KindConfig>,
}

/// Template location and fields resolved for one invocation.
#[derive(Debug, PartialEq)]
pub struct TemplateParams {
    pub template_path: PathBuf,
    pub fields: Fields,
}

/// Loads the configuration file at `path`.
///
/// A missing file is not an error: it yields a configuration without kinds,
/// so every kind falls back to the default template location.
///
/// # Errors
/// * `Error::IoError` if the file exists but cannot be read
/// * `Error::ConfigError` if the content is not a valid configuration
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let root = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", path.display());
            return Ok(Config { root, kinds: IndexMap::new() });
        }
        Err(e) => return Err(Error::io(path, e)),
    };

    debug!("Loading configuration from {}", path.display());
    let kinds = parse_config(&content).map_err(|e| match e {
        Error::ConfigError(msg) => Error::ConfigError(format!("{} ('{}')", msg, path.display())),
        other => other,
    })?;

    Ok(Config { root, kinds })
}

/// Parses configuration content into kind records.
///
/// # Errors
/// * `Error::ConfigError` if the YAML is malformed or does not map kinds to records
pub fn parse_config(content: &str) -> Result<IndexMap<String, KindConfig>> {
    if content.trim().is_empty() {
        return Ok(IndexMap::new());
    }

    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {}", e)))?;
    if raw.is_null() {
        return Ok(IndexMap::new());
    }

    let kinds: IndexMap<String, Option<KindConfig>> = serde_yaml::from_value(raw)
        .map_err(|e| Error::ConfigError(format!("Invalid schema: {}", e)))?;

    Ok(kinds.into_iter().map(|(kind, record)| (kind, record.unwrap_or_default())).collect())
}

impl Config {
    /// Resolves the template path and fields for `kind`.
    ///
    /// Fields are merged in order, later sources winning: the kind's defaults,
    /// the `name` field derived from `basename`, then `overrides`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the template path is not a valid path string,
    ///   a default is not a scalar, or a required field is left unset
    pub fn resolve(&self, basename: &str, kind: &str, overrides: &Fields) -> Result<TemplateParams> {
        let record = self.kinds.get(kind);
        if record.is_none() {
            debug!("Kind `{}` is not configured, using the default template location", kind);
        }

        let template_path = self.template_path(kind, record)?;

        let mut fields = Fields::new();
        let mut required = Vec::new();
        if let Some(record) = record {
            for (key, default) in &record.fields {
                match default {
                    Some(value) => {
                        fields.insert(key.clone(), scalar_to_string(key, value)?);
                    }
                    None => required.push(key.as_str()),
                }
            }
        }
        fields.insert(NAME_FIELD.to_string(), stem(basename).to_string());
        fields.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

        if let Some(missing) = required.into_iter().find(|key| !fields.contains_key(*key)) {
            return Err(Error::ConfigError(format!(
                "kind `{}` requires field `{}`; pass it with --field {}=VALUE",
                kind, missing, missing
            )));
        }

        debug!("Template for kind `{}`: {}", kind, template_path.display());
        Ok(TemplateParams { template_path, fields })
    }

    fn template_path(&self, kind: &str, record: Option<&KindConfig>) -> Result<PathBuf> {
        let Some(raw) = record.and_then(|r| r.template_path.as_deref()) else {
            return Ok(self.root.join(TEMPLATES_DIR).join(kind));
        };

        if raw.trim().is_empty() || raw.contains('\0') {
            return Err(Error::ConfigError(format!(
                "template_path {:?} for kind `{}` is not a valid path",
                raw, kind
            )));
        }

        let path = expand_home(raw)?;
        Ok(if path.is_relative() { self.root.join(path) } else { path })
    }
}

/// Loads the configuration at `config_path` and resolves `kind` against it.
pub fn prepare_params<P: AsRef<Path>>(
    basename: &str,
    kind: &str,
    config_path: P,
    overrides: &Fields,
) -> Result<TemplateParams> {
    load_config(config_path)?.resolve(basename, kind, overrides)
}

/// Expands a leading `~` to the user's home directory.
fn expand_home(raw: &str) -> Result<PathBuf> {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return Ok(PathBuf::from(raw)),
    };
    let home = dirs::home_dir()
        .ok_or_else(|| Error::ConfigError(format!("cannot expand '{}': no home directory", raw)))?;
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

fn scalar_to_string(key: &str, value: &serde_yaml::Value) -> Result<String> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        _ => Err(Error::ConfigError(format!(
            "field `{}` must be a string, number or boolean",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_to_string() {
        assert_eq!(scalar_to_string("k", &serde_yaml::Value::from("v")).unwrap(), "v");
        assert_eq!(scalar_to_string("k", &serde_yaml::Value::from(3)).unwrap(), "3");
        assert_eq!(scalar_to_string("k", &serde_yaml::Value::from(true)).unwrap(), "true");
        assert!(scalar_to_string("k", &serde_yaml::Value::Sequence(vec![])).is_err());
    }

    #[test]
    fn test_expand_home_leaves_other_paths_alone() {
        assert_eq!(expand_home("templates/a").unwrap(), PathBuf::from("templates/a"));
        assert_eq!(expand_home("/abs/a").unwrap(), PathBuf::from("/abs/a"));
        assert_eq!(expand_home("~user/a").unwrap(), PathBuf::from("~user/a"));
    }
}
