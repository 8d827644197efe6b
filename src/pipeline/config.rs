//! Pipeline configuration, persisted as TOML.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mapper::DEFAULT_MAX_DEPTH;
use crate::query::DEFAULT_PLACEHOLDER;
use crate::validate::{
    CommandValidator, DEFAULT_TIMEOUT_SECS, HttpValidator, SchemaSource, SchemaValidator,
};

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Settings for one pipeline. Every field has a default, so an empty file is
/// a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Namespace token the mapping queries are written against.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Deployment namespace substituted for the placeholder. Unset means the
    /// queries run as written.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Nesting limit for element recursion.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Map independent root subjects on worker threads.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default)]
    pub validation: Option<ValidationConfig>,
}

/// Where the schema lives and which validator checks against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Schema URL or file path.
    #[serde(default)]
    pub schema: Option<String>,
    /// Command line of an external validator program.
    #[serde(default)]
    pub command: Option<String>,
    /// URL of an HTTP validator.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.into()
}
fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
fn default_parallel() -> bool {
    true
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            namespace: None,
            max_depth: default_max_depth(),
            parallel: default_parallel(),
            validation: None,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            schema: None,
            command: None,
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PipelineConfig {
    /// Default settings bound to a deployment namespace.
    pub fn with_namespace(namespace: &str) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            ..Default::default()
        }
    }

    /// Reject settings no pipeline can run with.
    pub fn check(&self) -> ConfigResult<()> {
        if self.placeholder.is_empty() {
            return Err(ConfigError::Invalid {
                message: "placeholder must not be empty".into(),
            });
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid {
                message: "max_depth must be at least 1".into(),
            });
        }
        if let Some(validation) = &self.validation {
            validation.check()?;
        }
        Ok(())
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.check()?;
        Ok(config)
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}

impl ValidationConfig {
    fn check(&self) -> ConfigResult<()> {
        if self.command.is_some() && self.endpoint.is_some() {
            return Err(ConfigError::Invalid {
                message: "set either validation.command or validation.endpoint, not both".into(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn schema_source(&self) -> Option<SchemaSource> {
        self.schema.as_deref().map(SchemaSource::parse)
    }

    /// The configured validator, if any.
    pub fn validator(&self) -> ConfigResult<Option<Box<dyn SchemaValidator>>> {
        self.check()?;
        if let Some(command) = &self.command {
            let validator = CommandValidator::from_command_line(command).map_err(|e| {
                ConfigError::Invalid {
                    message: e.to_string(),
                }
            })?;
            return Ok(Some(Box::new(validator)));
        }
        Ok(self.endpoint.as_ref().map(|endpoint| {
            Box::new(HttpValidator::new(endpoint.as_str()).with_timeout(self.timeout()))
                as Box<dyn SchemaValidator>
        }))
    }
}
