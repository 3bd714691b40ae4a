//! Bindings and the producers they hold.

use crate::construct::{Construct, TypeRef};
use crate::container::Container;
use crate::error::{BindingError, Result};
use crate::instance::Instance;
use crate::parameters::Parameters;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A factory callback. It receives the container and the caller's parameters
/// and is fully responsible for producing the instance.
pub type Factory = Arc<dyn Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync>;

/// What a binding produces, stated explicitly by the registering code.
#[derive(Clone)]
pub enum Concrete {
  /// Invoke the callback on every build.
  Factory(Factory),
  /// Instantiate the type from positional arguments.
  Type(TypeRef),
  /// Hand out the value itself.
  Value(Instance),
  /// Explicit "no instance".
  Null,
}

impl Concrete {
  pub fn factory<F>(factory: F) -> Self
  where
    F: Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync + 'static,
  {
    Concrete::Factory(Arc::new(factory))
  }

  /// A type to instantiate through its `Construct` implementation.
  pub fn of<T: Construct>() -> Self {
    Concrete::Type(TypeRef::of::<T>())
  }

  pub fn value<T: Any + Send + Sync>(value: T) -> Self {
    Concrete::Value(Instance::new(value))
  }

  pub fn is_factory(&self) -> bool {
    matches!(self, Concrete::Factory(_))
  }

  pub(crate) fn kind(&self) -> &'static str {
    match self {
      Concrete::Factory(_) => "a factory",
      Concrete::Type(_) => "a type",
      Concrete::Value(_) => "a value",
      Concrete::Null => "null",
    }
  }
}

impl From<TypeRef> for Concrete {
  fn from(ty: TypeRef) -> Self {
    Concrete::Type(ty)
  }
}

impl From<Instance> for Concrete {
  fn from(instance: Instance) -> Self {
    if instance.is_none() {
      Concrete::Null
    } else {
      Concrete::Value(instance)
    }
  }
}

impl fmt::Debug for Concrete {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Concrete::Factory(_) => f.write_str("Factory(..)"),
      Concrete::Type(ty) => f.debug_tuple("Type").field(ty).finish(),
      Concrete::Value(value) => f.debug_tuple("Value").field(value).finish(),
      Concrete::Null => f.write_str("Null"),
    }
  }
}

/// The stored association between an abstract and its producer.
///
/// A binding is a value object: it is validated once on construction and
/// replaced wholesale when the same abstract is registered again.
#[derive(Clone, Debug)]
pub struct Binding {
  id: String,
  concrete: Concrete,
  shared: bool,
}

impl Binding {
  /// Creates a binding, rejecting a value concrete that holds a bare scalar.
  pub fn new(id: impl Into<String>, concrete: Concrete, shared: bool) -> Result<Self, BindingError> {
    let id = id.into();
    if let Concrete::Value(value) = &concrete {
      if value.is_scalar() {
        return Err(BindingError::InvalidConcrete {
          id,
          reason: "concrete must be a callback, an object, a type or null",
        });
      }
    }
    Ok(Self { id, concrete, shared })
  }

  /// A factory binding never fails validation.
  pub(crate) fn factory(id: String, factory: Factory, shared: bool) -> Self {
    Self {
      id,
      concrete: Concrete::Factory(factory),
      shared,
    }
  }

  /// The abstract identifier.
  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn concrete(&self) -> &Concrete {
    &self.concrete
  }

  pub fn is_shared(&self) -> bool {
    self.shared
  }

  /// `true` when the concrete is invoked as a callback rather than instantiated.
  pub fn is_callback(&self) -> bool {
    self.concrete.is_factory()
  }
}
