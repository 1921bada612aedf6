//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::validate_and_normalize;
pub use xml::{load_config, load_config_from_xml_path};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "POST_FINALIZE_CONFIG";

/// Cleanup list used when neither the config file nor the CLI sets one.
pub const EXT_CLEANUP_DEFAULT: &str = ".nfo, .sfv, .srr, .url";
