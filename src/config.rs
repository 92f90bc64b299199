//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/xmlmodel/xmlmodel.toml`
//! 3. Explicit config file passed on the command line
//! 4. Environment variables: `XMLMODEL_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::serialize::DEFAULT_INDENT_WIDTH;
use crate::domain::Renderer;
use crate::infrastructure::InfraError;

const ENV_PREFIX: &str = "XMLMODEL";

/// Unified configuration for xmlmodel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Spaces per nesting level in the text output (default: 2)
    pub indent_width: usize,
    /// Where `export` writes the document (default: output.xml)
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            output: PathBuf::from("output.xml"),
        }
    }
}

/// Get the XDG config directory for xmlmodel.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "xmlmodel").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("xmlmodel.toml"))
}

fn config_err(e: ConfigError) -> InfraError {
    InfraError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file; unlike the global file it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, InfraError> {
        Self::load_from(global_config_path().as_deref(), explicit)
    }

    /// Same as [`Settings::load`] with the global config location supplied by the caller.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, InfraError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("indent_width", defaults.indent_width as u64)
            .map_err(config_err)?
            .set_default("output", defaults.output.to_string_lossy().to_string())
            .map_err(config_err)?;

        if let Some(global_path) = global {
            builder = builder.add_source(File::from(global_path).required(false));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(InfraError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), InfraError> {
        if self.output.as_os_str().is_empty() {
            return Err(InfraError::Config {
                message: "output must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Renderer honouring `indent_width`.
    pub fn renderer(&self) -> Renderer {
        Renderer::with_indent_width(self.indent_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.indent_width, 2);
        assert_eq!(settings.output, PathBuf::from("output.xml"));
    }
}
