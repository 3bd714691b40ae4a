//! Dependency declarations for instantiable types.

use crate::construct::{Construct, TypeRef};
use crate::instance::Instance;
use std::any::Any;
use std::fmt;

/// One element of a type's dependency declaration.
///
/// Elements are expanded in declaration order into the positional arguments
/// of the type's constructor.
#[derive(Clone)]
pub enum Dependency {
  /// Passed to the constructor unchanged. Callables are literals too.
  Literal(Instance),
  /// Resolved through the container by abstract or alias.
  Reference(String),
  /// Built as a nested type with no parameters.
  Type(TypeRef),
}

impl Dependency {
  pub fn literal<T: Any + Send + Sync>(value: T) -> Self {
    Dependency::Literal(Instance::new(value))
  }

  pub fn reference(id: impl Into<String>) -> Self {
    Dependency::Reference(id.into())
  }

  pub fn of<T: Construct>() -> Self {
    Dependency::Type(TypeRef::of::<T>())
  }

  /// A short description used in build errors.
  pub(crate) fn describe(&self) -> String {
    match self {
      Dependency::Literal(_) => String::from("literal"),
      Dependency::Reference(id) => id.clone(),
      Dependency::Type(ty) => ty.name().to_string(),
    }
  }
}

impl From<Instance> for Dependency {
  fn from(instance: Instance) -> Self {
    Dependency::Literal(instance)
  }
}

impl From<TypeRef> for Dependency {
  fn from(ty: TypeRef) -> Self {
    Dependency::Type(ty)
  }
}

impl fmt::Debug for Dependency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Dependency::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
      Dependency::Reference(id) => f.debug_tuple("Reference").field(id).finish(),
      Dependency::Type(ty) => f.debug_tuple("Type").field(&ty.name()).finish(),
    }
  }
}
