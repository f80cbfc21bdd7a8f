//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or the first standard location found
    ///
    /// An explicit path that does not exist is an error; when no path is
    /// given and no standard file exists, defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let schema: ConfigSchema = toml::from_str(content)?;
        schema.validate()?;
        Ok(Self { schema, path: None })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = ["artprint.toml", ".artprint.toml", ".config/artprint.toml"];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read config file {}", path.display()))?;

    let schema: ConfigSchema = toml::from_str(&content)
        .context(format!("Failed to parse config file {}", path.display()))?;
    schema.validate()?;
    Ok(schema)
}
