//! Container options and their YAML representation.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// How `resolve_abstract` treats an alias that points at another alias.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AliasChains {
  /// Follow aliases until a name is reached that is not an alias.
  #[default]
  Follow,
  /// Dereference a single level only.
  Single,
}

fn default_max_depth() -> usize {
  64
}

/// Options fixed at container creation.
///
/// ```yaml
/// alias_chains: single
/// max_depth: 32
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ContainerOptions {
  #[serde(default)]
  pub alias_chains: AliasChains,
  /// Maximum number of nested resolutions on one thread.
  #[serde(default = "default_max_depth")]
  pub max_depth: usize,
}

impl Default for ContainerOptions {
  fn default() -> Self {
    Self {
      alias_chains: AliasChains::default(),
      max_depth: default_max_depth(),
    }
  }
}

impl ContainerOptions {
  pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
    let options: ContainerOptions = serde_yaml::from_str(source)?;
    options.validate()?;
    Ok(options)
  }

  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let source = std::fs::read_to_string(path)?;
    Self::from_yaml_str(&source)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.max_depth == 0 {
      return Err(ConfigError::Invalid {
        field: "max_depth",
        message: "must be at least 1".to_string(),
      });
    }
    Ok(())
  }
}
