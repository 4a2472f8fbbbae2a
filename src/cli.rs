//! Command-line interface implementation for fromtemplate.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::constants::{CONFIG_DIR, CONFIG_FILE};
use crate::error::{Error, Result};
use crate::parser::parse_field_override;

/// Command-line arguments structure for fromtemplate.
#[derive(Parser, Debug)]
#[command(author, version, about = "fromtemplate: generate files and directories from templates", long_about = None)]
pub struct Args {
    /// Path to the newly generated file or directory
    #[arg(value_name = "NEW_FILE_PATH")]
    pub new_file_path: PathBuf,

    /// Kind of file or directory to generate. Inferred from the file suffix
    /// (everything after the first period) when omitted
    #[arg(long)]
    pub kind: Option<String>,

    /// Path to a YAML configuration file [default: $HOME/.fromtemplate/config.yaml]
    #[arg(long, value_name = "PATH")]
    pub config_yaml: Option<PathBuf>,

    /// Set a template field, overriding the configured default
    #[arg(short, long = "field", value_name = "KEY=VALUE", value_parser = parse_field_override)]
    pub fields: Vec<(String, String)>,

    /// Read additional fields as a JSON object from stdin
    #[arg(short, long)]
    pub stdin: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Returns the configuration path, defaulting to
    /// `$HOME/.fromtemplate/config.yaml`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if no path was given and the home directory is unknown
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config_yaml {
            Some(path) => Ok(path.clone()),
            None => default_config_path(),
        }
    }
}

/// Default configuration location under the user's home directory.
pub fn default_config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
        .ok_or_else(|| {
            Error::ConfigError(
                "cannot locate the home directory; pass --config-yaml explicitly".to_string(),
            )
        })
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
