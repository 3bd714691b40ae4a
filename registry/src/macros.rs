//! Public macros for declaring dependencies and resolving services.

/// Builds a `Vec<Dependency>`.
///
/// - `ref "id"` resolves another abstract or alias through the container.
/// - `type T` builds `T` as a nested type.
/// - any other expression is passed to the constructor as a literal.
///
/// # Examples
///
/// ```
/// use fibre_registry::{dependencies, Dependency};
///
/// struct Engine;
/// # impl fibre_registry::Construct for Engine {
/// #   fn construct(_: fibre_registry::Arguments) -> fibre_registry::Result<Self> { Ok(Engine) }
/// # }
///
/// let deps: Vec<Dependency> = dependencies![ref "config", type Engine, "John Doe", false];
/// assert_eq!(deps.len(), 4);
/// assert!(matches!(deps[0], Dependency::Reference(_)));
/// assert!(matches!(deps[1], Dependency::Type(_)));
/// ```
#[macro_export]
macro_rules! dependencies {
    (@push $deps:ident;) => {};

    (@push $deps:ident; ref $id:expr $(, $($rest:tt)*)?) => {
        $deps.push($crate::Dependency::reference($id));
        $crate::dependencies!(@push $deps; $($($rest)*)?);
    };

    (@push $deps:ident; type $ty:ty $(, $($rest:tt)*)?) => {
        $deps.push($crate::Dependency::of::<$ty>());
        $crate::dependencies!(@push $deps; $($($rest)*)?);
    };

    (@push $deps:ident; $value:expr $(, $($rest:tt)*)?) => {
        $deps.push($crate::Dependency::literal($value));
        $crate::dependencies!(@push $deps; $($($rest)*)?);
    };

    () => {
        ::std::vec::Vec::<$crate::Dependency>::new()
    };

    ($($items:tt)+) => {{
        let mut deps = ::std::vec::Vec::<$crate::Dependency>::new();
        $crate::dependencies!(@push deps; $($items)+);
        deps
    }};
}

/// Resolves a service from a container.
///
/// This macro is meant for application code where a missing service is a
/// programming error.
///
/// # Panics
///
/// Panics if the abstract cannot be resolved or, in the typed form, does not
/// resolve to the requested type. For a non-panicking version, use
/// `Container::make` or `Container::make_as` directly.
///
/// # Examples
///
/// ```
/// use fibre_registry::{resolve, Container, Instance};
///
/// let container = Container::create().unwrap();
/// container.singleton("greeting", |_, _| Ok(Instance::new(String::from("hello"))));
///
/// let greeting = resolve!(container, "greeting" as String);
/// assert_eq!(*greeting, "hello");
///
/// let raw = resolve!(container, "greeting");
/// assert!(raw.is::<String>());
/// ```
#[macro_export]
macro_rules! resolve {
    // Arm for a typed service: resolve!(container, "id" as Type)
    ($container:expr, $id:literal as $ty:ty) => {
        $container.make_as::<$ty>($id).unwrap_or_else(|err| {
            panic!(
                "Failed to resolve required service '{}' as {}: {}",
                $id,
                std::any::type_name::<$ty>(),
                err
            )
        })
    };

    // Arm for the raw instance: resolve!(container, "id")
    ($container:expr, $id:expr) => {
        $container.make($id).unwrap_or_else(|err| {
            panic!("Failed to resolve required service '{}': {}", $id, err)
        })
    };
}
