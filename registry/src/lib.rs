//! # Fibre Registry
//!
//! A runtime service registry for Rust.
//!
//! Callers register an *abstract* (a string identifier) together with a way to
//! produce a value, then request that abstract back and receive either a
//! freshly built value or a cached, shared one.
//!
//! ## Core Concepts
//!
//! - **Container**: the registry. Exactly one exists per process; create it
//!   at the application's composition root and pass it by reference.
//! - **Concrete**: what a binding produces, stated explicitly: a factory
//!   callback, a type to instantiate, a plain value, or null.
//! - **Shared bindings**: built once on first resolution, then cached until
//!   `forget` or `flush`.
//! - **Aliases**: alternate names for an already bound abstract.
//! - **Dependencies**: an ordered list that tells the container how to build a
//!   type's positional constructor arguments: literals, references to other
//!   abstracts, or nested types.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_registry::{dependencies, Arguments, Construct, Container, Instance, Result, TypeRef};
//! use std::sync::Arc;
//!
//! struct Config {
//!   url: String,
//! }
//!
//! struct Database {
//!   config: Arc<Config>,
//!   pool_size: Arc<u32>,
//! }
//!
//! impl Construct for Database {
//!   fn construct(args: Arguments) -> Result<Self> {
//!     Ok(Database {
//!       config: args.get(0)?,
//!       pool_size: args.get(1)?,
//!     })
//!   }
//! }
//!
//! fn main() -> Result<()> {
//!   let container = Container::create()?;
//!
//!   container.singleton("config", |_, _| {
//!     Ok(Instance::new(Config { url: "postgres://localhost/app".to_string() }))
//!   });
//!   container.singleton_instance("db", TypeRef::of::<Database>(), dependencies![ref "config", 8_u32])?;
//!   container.alias("db", "database")?;
//!
//!   let db = container.make_as::<Database>("database")?;
//!   assert_eq!(db.config.url, "postgres://localhost/app");
//!   assert_eq!(*db.pool_size, 8);
//!   assert!(Arc::ptr_eq(&db, &container.make_as::<Database>("db")?));
//!   Ok(())
//! }
//! ```

mod binding;
mod config;
mod construct;
mod container;
mod core;
mod dependency;
mod error;
mod global;
mod instance;
mod macros;
mod parameters;

pub use binding::{Binding, Concrete, Factory};
pub use config::{AliasChains, ContainerOptions};
pub use construct::{Construct, TypeRef};
pub use container::Container;
pub use dependency::Dependency;
pub use error::{BindingError, BuildError, ConfigError, ContainerError, Result};
pub use global::container_exists;
pub use instance::Instance;
pub use parameters::{Arguments, Parameters};
