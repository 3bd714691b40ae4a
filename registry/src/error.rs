//! Error types surfaced by the registry.

use thiserror::Error;

/// The top-level error for every fallible registry operation.
#[derive(Debug, Error)]
pub enum ContainerError {
  #[error(transparent)]
  Binding(#[from] BindingError),

  #[error(transparent)]
  Build(#[from] BuildError),

  #[error("The container for this process has already been created")]
  AlreadyExists,

  #[error(transparent)]
  Config(#[from] ConfigError),

  /// A failure raised by user code inside a factory callback or constructor.
  #[error("Callback failed: {0}")]
  Callback(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ContainerError {
  /// Wraps an arbitrary error raised by a factory or constructor.
  pub fn callback<E>(error: E) -> Self
  where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
  {
    ContainerError::Callback(error.into())
  }

  /// Returns `true` if this error reports a circular dependency.
  pub fn is_cycle(&self) -> bool {
    matches!(self, ContainerError::Build(BuildError::Cycle { .. }))
  }
}

/// Raised when a binding or alias cannot be found, created or validated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindingError {
  #[error("No binding found for abstract \"{0}\"")]
  NotFound(String),

  #[error("Cannot assign alias \"{alias}\" for abstract \"{id}\". Abstract has no binding.")]
  Unbound { id: String, alias: String },

  #[error("Alias \"{alias}\" for abstract \"{id}\" would form an alias cycle")]
  AliasCycle { id: String, alias: String },

  #[error("Invalid concrete for \"{id}\": {reason}")]
  InvalidConcrete { id: String, reason: &'static str },

  #[error("Dependencies can only be declared for a type, but \"{id}\" is bound to {kind}")]
  DependenciesWithoutType { id: String, kind: &'static str },
}

/// Raised while building an instance.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("Cannot resolve dependency #{index} (\"{dependency}\") of {target}: {source}")]
  UnresolvedDependency {
    target: &'static str,
    index: usize,
    dependency: String,
    source: BindingError,
  },

  #[error("Dependency #{index} of {target} is empty and cannot be injected")]
  EmptyDependency { target: &'static str, index: usize },

  #[error("Circular dependency detected: {}", .chain.join(" -> "))]
  Cycle { chain: Vec<String> },

  #[error("Resolution depth limit of {limit} exceeded while resolving {key}")]
  DepthExceeded { key: String, limit: usize },

  #[error("{target} expects an argument at position {index}, but none was given")]
  MissingArgument { target: &'static str, index: usize },

  #[error("Argument #{index} of {target} is not a {expected}")]
  ArgumentType {
    target: &'static str,
    index: usize,
    expected: &'static str,
  },

  #[error("Abstract \"{id}\" did not resolve to a {expected}")]
  UnexpectedType { id: String, expected: &'static str },
}

/// Raised when loading or validating `ContainerOptions`.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to read configuration file: {0}")]
  Read(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  Parse(#[from] serde_yaml::Error),

  #[error("Invalid configuration value for '{field}': {message}")]
  Invalid { field: &'static str, message: String },
}

/// A specialized `Result` type for registry operations.
pub type Result<T, E = ContainerError> = std::result::Result<T, E>;
