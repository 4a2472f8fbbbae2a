//! Common constants used throughout fromtemplate.

/// Directory under the user's home holding the default configuration
pub const CONFIG_DIR: &str = ".fromtemplate";

/// Default configuration file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.yaml";

/// Directory next to the configuration file holding templates named after their kind
pub const TEMPLATES_DIR: &str = "templates";

/// Field derived from the destination basename
pub const NAME_FIELD: &str = "name";

/// Prefix of the hidden staging directory created next to the destination
pub const STAGING_PREFIX: &str = ".fromtemplate-";
