//! Core, non-public resolution bookkeeping.

use crate::construct::TypeRef;
use crate::error::BuildError;
use std::any::TypeId;
use std::cell::RefCell;
use std::fmt;

thread_local! {
  // The chain of resolutions in progress on this thread, outermost first.
  static RESOLVING_STACK: RefCell<Vec<ResolutionKey>> = const { RefCell::new(Vec::new()) };
}

/// What is being resolved: an abstract through `make`, or a nested type.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) enum ResolutionKey {
  Abstract(String),
  Type { id: TypeId, name: &'static str },
}

impl ResolutionKey {
  pub(crate) fn of_type(ty: &TypeRef) -> Self {
    ResolutionKey::Type {
      id: ty.type_id(),
      name: ty.name(),
    }
  }
}

impl fmt::Display for ResolutionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ResolutionKey::Abstract(id) => write!(f, "{id}"),
      ResolutionKey::Type { name, .. } => write!(f, "<{name}>"),
    }
  }
}

impl fmt::Debug for ResolutionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self, f)
  }
}

/// An RAII guard that detects circular dependencies and runaway depth.
///
/// Entering pushes the key onto the thread-local resolution stack, failing if
/// the key is already on it. Dropping the guard pops the key again, so the
/// stack is restored on every exit path, errors included.
pub(crate) struct ResolutionGuard {
  key: ResolutionKey,
}

impl ResolutionGuard {
  pub(crate) fn enter(key: ResolutionKey, max_depth: usize) -> Result<Self, BuildError> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(start) = stack.iter().position(|k| *k == key) {
        let mut chain: Vec<String> = stack[start..].iter().map(ToString::to_string).collect();
        chain.push(key.to_string());
        return Err(BuildError::Cycle { chain });
      }
      if stack.len() >= max_depth {
        return Err(BuildError::DepthExceeded {
          key: key.to_string(),
          limit: max_depth,
        });
      }
      stack.push(key.clone());
      Ok(())
    })?;
    Ok(Self { key })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(pos) = stack.iter().rposition(|k| *k == self.key) {
        stack.remove(pos);
      }
    });
  }
}

#[cfg(test)]
pub(crate) fn resolving_depth() -> usize {
  RESOLVING_STACK.with(|stack| stack.borrow().len())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(id: &str) -> ResolutionKey {
    ResolutionKey::Abstract(id.to_string())
  }

  #[test]
  fn test_guard_detects_reentry() {
    let _a = ResolutionGuard::enter(key("a"), 8).unwrap();
    let _b = ResolutionGuard::enter(key("b"), 8).unwrap();

    match ResolutionGuard::enter(key("a"), 8) {
      Err(BuildError::Cycle { chain }) => assert_eq!(chain, vec!["a", "b", "a"]),
      Err(other) => panic!("unexpected error: {other}"),
      Ok(_) => panic!("cycle was not detected"),
    }
  }

  #[test]
  fn test_guard_pops_on_drop() {
    {
      let _a = ResolutionGuard::enter(key("x"), 8).unwrap();
      assert_eq!(resolving_depth(), 1);
    }
    assert_eq!(resolving_depth(), 0);
    assert!(ResolutionGuard::enter(key("x"), 8).is_ok());
  }

  #[test]
  fn test_depth_limit() {
    let _a = ResolutionGuard::enter(key("one"), 2).unwrap();
    let _b = ResolutionGuard::enter(key("two"), 2).unwrap();

    assert!(matches!(
      ResolutionGuard::enter(key("three"), 2),
      Err(BuildError::DepthExceeded { limit: 2, .. })
    ));
  }

  #[test]
  fn test_stacks_are_per_thread() {
    let _a = ResolutionGuard::enter(key("shared"), 8).unwrap();

    std::thread::spawn(|| {
      assert!(ResolutionGuard::enter(key("shared"), 8).is_ok());
    })
    .join()
    .unwrap();
  }
}
