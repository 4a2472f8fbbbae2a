//! fromtemplate generates a new file or directory tree from a named template.
//! The template is picked by the destination's kind (its suffix) and rendered
//! with fields read from a YAML configuration file and the command line.

/// Command-line interface module
pub mod cli;

/// YAML configuration loading and template/field resolution
pub mod config;

/// Fixed names and default locations
pub mod constants;

/// Error types and handling
pub mod error;

/// Orchestration of a single generation
pub mod generate;

/// Kind inference from destination suffixes
pub mod kind;

/// Logger initialisation
pub mod logger;

/// Runtime field overrides (`--field`, `--stdin`)
pub mod parser;

/// Template tree rendering onto the destination
pub mod processor;

/// Placeholder substitution
pub mod renderer;
