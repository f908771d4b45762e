use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Returns the default tag prefix ("v", as in tags like "v1.2.3").
fn default_tag_prefix() -> String {
    "v".to_string()
}

/// Returns the default parent-directory prefix (empty, matching any name).
fn default_parentdir_prefix() -> String {
    String::new()
}

/// Returns the default location of the keyword-bearing source file,
/// relative to the tree root.
fn default_versionfile_source() -> String {
    "src/keywords.rs".to_string()
}

/// Represents the complete configuration for srcver.
///
/// All three values are fixed at packaging time and read-only for the
/// lifetime of a resolution.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prefix that project release tags carry (e.g. "v" for "v1.2.3").
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// Prefix expected at the start of an extracted tarball's directory
    /// name (e.g. "myproj-" for "myproj-1.2.3").
    #[serde(default = "default_parentdir_prefix")]
    pub parentdir_prefix: String,

    /// Path, relative to the tree root, of the source file carrying the
    /// git-archive keyword placeholders.
    #[serde(default = "default_versionfile_source")]
    pub versionfile_source: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag_prefix: default_tag_prefix(),
            parentdir_prefix: default_parentdir_prefix(),
            versionfile_source: default_versionfile_source(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `srcver.toml` in current directory
/// 3. `srcver.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./srcver.toml").exists() {
        fs::read_to_string("./srcver.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("srcver.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.tag_prefix, "v");
        assert_eq!(config.parentdir_prefix, "");
        assert_eq!(config.versionfile_source, "src/keywords.rs");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(r#"tag_prefix = "myproj-""#).unwrap();
        assert_eq!(config.tag_prefix, "myproj-");
        assert_eq!(config.parentdir_prefix, "");
        assert_eq!(config.versionfile_source, "src/keywords.rs");
    }

    #[test]
    fn test_full_toml() {
        let config: Config = toml::from_str(
            r#"
tag_prefix = "v"
parentdir_prefix = "myproj-"
versionfile_source = "myproj/_version.rs"
"#,
        )
        .unwrap();
        assert_eq!(config.parentdir_prefix, "myproj-");
        assert_eq!(config.versionfile_source, "myproj/_version.rs");
    }
}
