//! @ai:module:intent Load optional TOML defaults and resolve the effective render settings
//! @ai:module:layer infrastructure
//! @ai:module:public_api ToolConfig, CliOverrides, DEFAULT_CONFIG_FILE
//! @ai:module:depends_on render, language, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::language::{detect_language, Language};
use crate::render::{RenderConfig, DEFAULT_NAMESPACE, DEFAULT_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "sqlc-consts.toml";

/// @ai:intent Settings that can be kept in a config file instead of passed as flags
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub strict: Option<bool>,
}

/// @ai:intent Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub package: Option<String>,
    pub prefix: Option<String>,
    pub language: Option<Language>,
    pub strict: bool,
}

impl ToolConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// @ai:intent Load the explicit config file, or the default one if it exists
    /// @ai:post explicit path that is missing is an error; missing default file is not
    /// @ai:effects fs:read
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = dir.join(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            tracing::debug!("Using config file {}", default_path.display());
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// @ai:intent Merge CLI flags over file settings over built-in defaults
    /// @ai:post language falls back to the output extension, then Go
    /// @ai:effects pure
    pub fn resolve(&self, cli: &CliOverrides, output: &Path) -> RenderConfig {
        let language = cli
            .language
            .or(self.language)
            .or_else(|| detect_language(output))
            .unwrap_or_default();

        RenderConfig {
            namespace: cli
                .package
                .clone()
                .or_else(|| self.package.clone())
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            prefix: cli
                .prefix
                .clone()
                .or_else(|| self.prefix.clone())
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            language,
        }
    }

    /// @ai:intent Strict mode is on if either the flag or the file enables it
    pub fn strict(&self, cli: &CliOverrides) -> bool {
        cli.strict || self.strict.unwrap_or(false)
    }
}
