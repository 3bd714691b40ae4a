//! Instantiable types.
//!
//! Rust has no runtime reflection, so a type becomes buildable by the registry
//! either by implementing [`Construct`] or by wrapping a constructor closure in
//! a [`TypeRef`]. Constructors receive positional [`Arguments`], produced from
//! the caller's parameters or from the type's declared dependencies.

use crate::dependency::Dependency;
use crate::error::Result;
use crate::instance::Instance;
use crate::parameters::Arguments;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A type the registry can instantiate.
///
/// # Examples
///
/// ```
/// use fibre_registry::{dependencies, Arguments, Construct, Dependency, Result};
/// use std::sync::Arc;
///
/// struct Config {
///   url: String,
/// }
///
/// struct Database {
///   config: Arc<Config>,
/// }
///
/// impl Construct for Database {
///   fn construct(args: Arguments) -> Result<Self> {
///     Ok(Database { config: args.get::<Config>(0)? })
///   }
///
///   fn dependencies() -> Vec<Dependency> {
///     dependencies![ref "config"]
///   }
/// }
/// ```
pub trait Construct: Any + Send + Sync + Sized {
  /// Builds `Self` from positional arguments.
  fn construct(args: Arguments) -> Result<Self>;

  /// The dependencies this type declares for itself. Used when the type is
  /// built without explicit parameters and the container holds no list of
  /// its own for the type.
  fn dependencies() -> Vec<Dependency> {
    Vec::new()
  }
}

type Constructor = Arc<dyn Fn(Arguments) -> Result<Instance> + Send + Sync>;

/// A reference to an instantiable type.
///
/// Identity is the `TypeId` of the produced type: two `TypeRef`s for the
/// same type share declared dependency lists in the container.
#[derive(Clone)]
pub struct TypeRef {
  name: &'static str,
  type_id: TypeId,
  constructor: Constructor,
  declared: fn() -> Vec<Dependency>,
}

impl TypeRef {
  pub fn of<T: Construct>() -> Self {
    Self {
      name: std::any::type_name::<T>(),
      type_id: TypeId::of::<T>(),
      constructor: Arc::new(|args| T::construct(args).map(Instance::new)),
      declared: T::dependencies,
    }
  }

  /// A type built by a closure. It declares no dependencies of its own.
  pub fn from_fn<T, F>(constructor: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(Arguments) -> Result<T> + Send + Sync + 'static,
  {
    Self {
      name: std::any::type_name::<T>(),
      type_id: TypeId::of::<T>(),
      constructor: Arc::new(move |args| constructor(args).map(Instance::new)),
      declared: Vec::new,
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  /// The type's own dependency declaration.
  pub fn declared_dependencies(&self) -> Vec<Dependency> {
    (self.declared)()
  }

  pub(crate) fn instantiate(&self, args: Arguments) -> Result<Instance> {
    (self.constructor)(args)
  }
}

impl fmt::Debug for TypeRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("TypeRef").field(&self.name).finish()
  }
}
