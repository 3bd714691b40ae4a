//! Construction parameters and the positional arguments derived from them.

use crate::error::BuildError;
use crate::instance::Instance;
use indexmap::IndexMap;
use std::any::{type_name, Any};
use std::sync::Arc;

/// Explicit parameters passed to `make_with` or `build`.
///
/// Factories see the parameters as given. Types receive them as positional
/// arguments: the positional form is used directly, the named form in
/// insertion order.
#[derive(Clone, Debug)]
pub enum Parameters {
  Positional(Vec<Instance>),
  Named(IndexMap<String, Instance>),
}

impl Default for Parameters {
  fn default() -> Self {
    Parameters::Positional(Vec::new())
  }
}

impl Parameters {
  /// No parameters.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn positional(values: impl IntoIterator<Item = Instance>) -> Self {
    Parameters::Positional(values.into_iter().collect())
  }

  pub fn named<K: Into<String>>(values: impl IntoIterator<Item = (K, Instance)>) -> Self {
    Parameters::Named(values.into_iter().map(|(k, v)| (k.into(), v)).collect())
  }

  /// Appends a positional value.
  ///
  /// Named parameters get the first index-based key not already taken, so an
  /// appended value never replaces an existing one.
  pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
    match &mut self {
      Parameters::Positional(values) => values.push(Instance::new(value)),
      Parameters::Named(values) => {
        let mut index = values.len();
        while values.contains_key(index.to_string().as_str()) {
          index += 1;
        }
        values.insert(index.to_string(), Instance::new(value));
      }
    }
    self
  }

  pub fn len(&self) -> usize {
    match self {
      Parameters::Positional(values) => values.len(),
      Parameters::Named(values) => values.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Looks up a value by position, in either form.
  pub fn at(&self, index: usize) -> Option<&Instance> {
    match self {
      Parameters::Positional(values) => values.get(index),
      Parameters::Named(values) => values.get_index(index).map(|(_, v)| v),
    }
  }

  /// Looks up a named value. Always `None` for positional parameters.
  pub fn get(&self, name: &str) -> Option<&Instance> {
    match self {
      Parameters::Positional(_) => None,
      Parameters::Named(values) => values.get(name),
    }
  }

  pub(crate) fn into_arguments(self, target: &'static str) -> Arguments {
    let values = match self {
      Parameters::Positional(values) => values,
      Parameters::Named(values) => values.into_values().collect(),
    };
    Arguments::new(target, values)
  }
}

impl From<Vec<Instance>> for Parameters {
  fn from(values: Vec<Instance>) -> Self {
    Parameters::Positional(values)
  }
}

/// Positional constructor arguments for one type.
#[derive(Clone, Debug)]
pub struct Arguments {
  target: &'static str,
  values: Vec<Instance>,
}

impl Arguments {
  pub fn new(target: &'static str, values: Vec<Instance>) -> Self {
    Self { target, values }
  }

  /// The name of the type being built.
  pub fn target(&self) -> &'static str {
    self.target
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// The raw instance at `index`.
  pub fn instance(&self, index: usize) -> Option<&Instance> {
    self.values.get(index)
  }

  /// The argument at `index`, downcast to `T`.
  pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>, BuildError> {
    let instance = self.values.get(index).ok_or(BuildError::MissingArgument {
      target: self.target,
      index,
    })?;
    instance.downcast::<T>().ok_or(BuildError::ArgumentType {
      target: self.target,
      index,
      expected: type_name::<T>(),
    })
  }

  /// Like `get`, but a missing argument yields `None` instead of an error.
  pub fn get_opt<T: Any + Send + Sync>(&self, index: usize) -> Result<Option<Arc<T>>, BuildError> {
    if index >= self.values.len() {
      return Ok(None);
    }
    self.get(index).map(Some)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Instance> {
    self.values.iter()
  }

  pub fn into_vec(self) -> Vec<Instance> {
    self.values
  }
}
