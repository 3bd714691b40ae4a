//! The `Container` struct: registration, aliasing and the resolution engine.

use crate::binding::{Binding, Concrete};
use crate::config::{AliasChains, ContainerOptions};
use crate::construct::TypeRef;
use crate::core::{ResolutionGuard, ResolutionKey};
use crate::dependency::Dependency;
use crate::error::{BindingError, BuildError, ContainerError, Result};
use crate::global;
use crate::instance::Instance;
use crate::parameters::{Arguments, Parameters};
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::any::{type_name, Any, TypeId};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// The runtime service registry.
///
/// Bindings, aliases and shared instances are keyed by string abstracts. Only
/// the container's own methods mutate them; callers get snapshots.
///
/// # Threading
///
/// All methods take `&self` and the maps are concurrent, so a container can be
/// shared between threads. No map guard is held while a producer runs, which
/// lets factories and constructors call back into the container. Shared
/// instances are built exactly once; concurrent first resolutions wait for
/// the one build. Cycle detection is per thread: a dependency cycle whose
/// halves are resolved on two different threads at the same time blocks
/// instead of failing. Multi-map operations (`forget`, `flush`) are not atomic
/// with respect to concurrent resolutions.
pub struct Container {
  bindings: DashMap<String, Binding>,
  aliases: DashMap<String, String>,
  instances: DashMap<String, Arc<OnceCell<Instance>>>,
  dependencies: DashMap<TypeId, Vec<Dependency>>,
  options: ContainerOptions,
}

impl Container {
  /// Creates the process's container with default options.
  ///
  /// Succeeds once per process. Every later call fails with
  /// [`ContainerError::AlreadyExists`], even after the first container has
  /// been dropped.
  pub fn create() -> Result<Self> {
    Self::with_options(ContainerOptions::default())
  }

  /// Creates the process's container with the given options.
  ///
  /// Invalid options are rejected before the container is claimed.
  pub fn with_options(options: ContainerOptions) -> Result<Self> {
    options.validate()?;
    global::claim()?;
    debug!(?options, "container created");
    Ok(Self {
      bindings: DashMap::new(),
      aliases: DashMap::new(),
      instances: DashMap::new(),
      dependencies: DashMap::new(),
      options,
    })
  }

  /// The options this container was created with.
  pub fn options(&self) -> &ContainerOptions {
    &self.options
  }

  // --- Registration ---

  /// Registers a binding, replacing any previous binding for the same abstract.
  pub fn register(&self, id: impl Into<String>, concrete: Concrete, shared: bool) -> Result<(), BindingError> {
    let binding = Binding::new(id, concrete, shared)?;
    self.insert_binding(binding);
    Ok(())
  }

  /// Registers a non-callback binding: a type, a value or null.
  ///
  /// A non-empty `dependencies` list is associated with the type and used
  /// whenever it is built without explicit parameters.
  pub fn register_instance(
    &self,
    id: impl Into<String>,
    concrete: impl Into<Concrete>,
    shared: bool,
    dependencies: Vec<Dependency>,
  ) -> Result<(), BindingError> {
    let id = id.into();
    let concrete = concrete.into();
    if concrete.is_factory() {
      return Err(BindingError::InvalidConcrete {
        id,
        reason: "instance bindings take a type, a value or null",
      });
    }
    if !dependencies.is_empty() {
      match &concrete {
        Concrete::Type(ty) => self.declare_dependencies(ty, dependencies),
        other => {
          return Err(BindingError::DependenciesWithoutType {
            id,
            kind: other.kind(),
          })
        }
      }
    }
    self.register(id, concrete, shared)
  }

  /// Binds a factory that runs on every resolution.
  pub fn bind<F>(&self, id: impl Into<String>, factory: F)
  where
    F: Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync + 'static,
  {
    self.insert_binding(Binding::factory(id.into(), Arc::new(factory), false));
  }

  /// Binds a factory whose first result is cached and reused.
  pub fn singleton<F>(&self, id: impl Into<String>, factory: F)
  where
    F: Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync + 'static,
  {
    self.insert_binding(Binding::factory(id.into(), Arc::new(factory), true));
  }

  /// Binds a type, value or null that is built on every resolution.
  pub fn bind_instance(
    &self,
    id: impl Into<String>,
    concrete: impl Into<Concrete>,
    dependencies: Vec<Dependency>,
  ) -> Result<(), BindingError> {
    self.register_instance(id, concrete, false, dependencies)
  }

  /// Binds a type, value or null whose first result is cached and reused.
  pub fn singleton_instance(
    &self,
    id: impl Into<String>,
    concrete: impl Into<Concrete>,
    dependencies: Vec<Dependency>,
  ) -> Result<(), BindingError> {
    self.register_instance(id, concrete, true, dependencies)
  }

  /// Associates a dependency list with a type, replacing any previous list.
  pub fn declare_dependencies(&self, ty: &TypeRef, dependencies: Vec<Dependency>) {
    debug!(target_type = ty.name(), count = dependencies.len(), "dependencies declared");
    self.dependencies.insert(ty.type_id(), dependencies);
  }

  fn insert_binding(&self, binding: Binding) {
    debug!(
      id = binding.id(),
      shared = binding.is_shared(),
      callback = binding.is_callback(),
      "binding registered"
    );
    self.bindings.insert(binding.id().to_string(), binding);
  }

  // --- Lookup ---

  /// `true` if `id` has a binding, a cached shared instance, or is an alias.
  pub fn bound(&self, id: &str) -> bool {
    self.bindings.contains_key(id) || self.cached(id).is_some() || self.aliases.contains_key(id)
  }

  /// Records `alias -> id`. The abstract must already be bound.
  pub fn alias(&self, id: &str, alias: impl Into<String>) -> Result<(), BindingError> {
    let alias = alias.into();
    if !self.bound(id) {
      return Err(BindingError::Unbound {
        id: id.to_string(),
        alias,
      });
    }
    if alias == id || self.alias_path(id).iter().any(|name| *name == alias) {
      return Err(BindingError::AliasCycle {
        id: id.to_string(),
        alias,
      });
    }
    debug!(id, alias = alias.as_str(), "alias assigned");
    self.aliases.insert(alias, id.to_string());
    Ok(())
  }

  /// Returns the abstract an alias points at, or `name` itself.
  pub fn resolve_abstract(&self, name: &str) -> String {
    match self.options.alias_chains {
      AliasChains::Single => self
        .aliases
        .get(name)
        .map(|target| target.value().clone())
        .unwrap_or_else(|| name.to_string()),
      AliasChains::Follow => self
        .alias_path(name)
        .pop()
        .unwrap_or_else(|| name.to_string()),
    }
  }

  // Every name visited while following aliases from `name`, `name` included.
  fn alias_path(&self, name: &str) -> Vec<String> {
    let mut path = vec![name.to_string()];
    let mut seen = HashSet::new();
    seen.insert(name.to_string());
    let mut current = name.to_string();
    while let Some(next) = self.aliases.get(&current).map(|target| target.value().clone()) {
      if !seen.insert(next.clone()) {
        break;
      }
      path.push(next.clone());
      current = next;
    }
    path
  }

  /// Returns the binding registered for `id`. Aliases are not consulted.
  pub fn get_binding(&self, id: &str) -> Result<Binding, BindingError> {
    self
      .bindings
      .get(id)
      .map(|binding| binding.value().clone())
      .ok_or_else(|| BindingError::NotFound(id.to_string()))
  }

  /// The dependency list used for `ty`: the container's own, else the type's.
  pub fn dependencies_of(&self, ty: &TypeRef) -> Vec<Dependency> {
    self
      .dependencies
      .get(&ty.type_id())
      .map(|deps| deps.value().clone())
      .unwrap_or_else(|| ty.declared_dependencies())
  }

  fn cached(&self, id: &str) -> Option<Instance> {
    self.instances.get(id).and_then(|cell| cell.get().cloned())
  }

  // --- Resolution ---

  /// Resolves `id` with no parameters.
  pub fn make(&self, id: &str) -> Result<Instance> {
    self.make_with(id, Parameters::new())
  }

  /// Resolves `id`.
  ///
  /// Aliases are dereferenced first. A cached shared instance is returned as
  /// is, parameters are ignored for cache hits. Otherwise the binding is built
  /// and, if shared, cached.
  pub fn make_with(&self, id: &str, parameters: Parameters) -> Result<Instance> {
    let id = self.resolve_abstract(id);

    if let Some(instance) = self.cached(&id) {
      trace!(id = id.as_str(), "shared instance cache hit");
      return Ok(instance);
    }

    let binding = self.get_binding(&id)?;
    let _guard = ResolutionGuard::enter(ResolutionKey::Abstract(id.clone()), self.options.max_depth)?;

    if !binding.is_shared() {
      return self.build(&binding, parameters);
    }

    let cell = self.instances.entry(id.clone()).or_default().value().clone();
    match cell.get_or_try_init(|| self.build(&binding, parameters)) {
      Ok(instance) => Ok(instance.clone()),
      Err(err) => {
        // A failed build must not leave an empty slot that reports as bound.
        self
          .instances
          .remove_if(&id, |_, slot| Arc::ptr_eq(slot, &cell) && slot.get().is_none());
        Err(err)
      }
    }
  }

  /// Resolves `id` and downcasts the result.
  pub fn make_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
    self.make(id)?.downcast::<T>().ok_or_else(|| {
      ContainerError::from(BuildError::UnexpectedType {
        id: id.to_string(),
        expected: type_name::<T>(),
      })
    })
  }

  /// Builds a binding's concrete. Nothing is cached.
  pub fn build(&self, binding: &Binding, parameters: Parameters) -> Result<Instance> {
    trace!(id = binding.id(), callback = binding.is_callback(), "building binding");
    self.build_concrete(binding.concrete(), parameters)
  }

  /// Produces a value from a concrete: calls a factory, instantiates a type,
  /// or hands out the value or null.
  pub fn build_concrete(&self, concrete: &Concrete, parameters: Parameters) -> Result<Instance> {
    match concrete {
      Concrete::Factory(factory) => factory(self, &parameters),
      Concrete::Type(ty) => self.build_type(ty, parameters),
      Concrete::Value(value) => Ok(value.clone()),
      Concrete::Null => Ok(Instance::none()),
    }
  }

  /// Instantiates a type.
  ///
  /// Without explicit parameters, the type's dependency list is expanded into
  /// positional arguments. With parameters, they are used as given.
  pub fn build_type(&self, ty: &TypeRef, parameters: Parameters) -> Result<Instance> {
    let arguments = if parameters.is_empty() {
      let dependencies = self.dependencies_of(ty);
      if dependencies.is_empty() {
        Arguments::new(ty.name(), Vec::new())
      } else {
        self.expand(ty, &dependencies)?
      }
    } else {
      parameters.into_arguments(ty.name())
    };
    trace!(target_type = ty.name(), arguments = arguments.len(), "instantiating type");
    ty.instantiate(arguments)
  }

  fn expand(&self, ty: &TypeRef, dependencies: &[Dependency]) -> Result<Arguments> {
    let values = dependencies
      .iter()
      .enumerate()
      .map(|(index, dependency)| self.resolve_dependency(ty, index, dependency))
      .collect::<Result<Vec<_>>>()?;
    Ok(Arguments::new(ty.name(), values))
  }

  fn resolve_dependency(&self, ty: &TypeRef, index: usize, dependency: &Dependency) -> Result<Instance> {
    trace!(target_type = ty.name(), index, dependency = %dependency.describe(), "expanding dependency");
    match dependency {
      Dependency::Literal(value) if value.is_none() => Err(ContainerError::from(BuildError::EmptyDependency {
        target: ty.name(),
        index,
      })),
      Dependency::Literal(value) => Ok(value.clone()),
      Dependency::Reference(id) => self.make(id).map_err(|err| match err {
        ContainerError::Binding(source) => ContainerError::from(BuildError::UnresolvedDependency {
          target: ty.name(),
          index,
          dependency: dependency.describe(),
          source,
        }),
        other => other,
      }),
      Dependency::Type(nested) => {
        let _guard = ResolutionGuard::enter(ResolutionKey::of_type(nested), self.options.max_depth)?;
        self.build_type(nested, Parameters::new())
      }
    }
  }

  // --- Removal ---

  /// Removes the binding, alias and cached instance keyed by `id`.
  pub fn forget(&self, id: &str) {
    let binding = self.bindings.remove(id).is_some();
    let alias = self.aliases.remove(id).is_some();
    let instance = self.instances.remove(id).is_some();
    debug!(id, binding, alias, instance, "forgot abstract");
  }

  /// Clears every binding, alias, shared instance and dependency list.
  pub fn flush(&self) {
    self.bindings.clear();
    self.aliases.clear();
    self.instances.clear();
    self.dependencies.clear();
    debug!("container flushed");
  }

  // --- Read-only views ---

  /// A snapshot of every registered binding.
  pub fn bindings(&self) -> Vec<Binding> {
    self.bindings.iter().map(|entry| entry.value().clone()).collect()
  }

  /// `(alias, abstract)` pairs.
  pub fn aliases(&self) -> Vec<(String, String)> {
    self
      .aliases
      .iter()
      .map(|entry| (entry.key().clone(), entry.value().clone()))
      .collect()
  }

  /// `(abstract, instance)` pairs for every shared instance built so far.
  pub fn shared_instances(&self) -> Vec<(String, Instance)> {
    self
      .instances
      .iter()
      .filter_map(|entry| entry.value().get().map(|instance| (entry.key().clone(), instance.clone())))
      .collect()
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("bindings", &self.bindings.len())
      .field("aliases", &self.aliases.len())
      .field("instances", &self.instances.len())
      .field("options", &self.options)
      .finish()
  }
}
