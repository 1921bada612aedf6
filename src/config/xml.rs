//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Unknown XML fields are rejected to surface misconfigurations early.
//!
//! Notes:
//! - This module only reads the config file; directory validation happens elsewhere.
//! - A missing file means "use defaults"; it is never created on the user's behalf.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "dest_base")]
    dest_base: Option<String>,
    #[serde(rename = "ext_cleanup")]
    ext_cleanup: Option<String>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

/// Trimmed, non-empty text of an optional element.
fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|t| !t.is_empty())
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    cfg.dest_base = non_empty(parsed.dest_base.as_deref()).map(PathBuf::from);
    cfg.log_file = non_empty(parsed.log_file.as_deref()).map(PathBuf::from);

    // An explicitly empty <ext_cleanup/> disables cleanup.
    if let Some(list) = parsed.ext_cleanup.as_deref() {
        cfg.ext_cleanup = list.trim().to_string();
    }

    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = s
            .parse::<LogLevel>()
            .map_err(anyhow::Error::msg)
            .context("log_level")?;
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in '{}'", path.display()))
}

/// Load the config from `$POST_FINALIZE_CONFIG` or the default location.
/// Ok(None) when no file exists there.
pub fn load_config() -> Result<Option<Config>> {
    let Some(path) = default_config_path() else {
        debug!("no config path could be determined; using defaults");
        return Ok(None);
    };
    if !path.exists() {
        debug!(path = %path.display(), "config file not found; using defaults");
        return Ok(None);
    }
    load_config_from_xml_path(&path).map(Some)
}
