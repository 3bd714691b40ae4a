//! The dynamic value handed out by the registry.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A resolved value.
///
/// `Instance` is an opaque, cheaply clonable handle. Clones share the same
/// allocation, so two instances can be compared by reference with
/// [`Instance::ptr_eq`]. The empty instance is what a `Null` concrete
/// resolves to.
#[derive(Clone, Default)]
pub struct Instance(Option<Arc<dyn Any + Send + Sync>>);

impl Instance {
  /// Wraps a value in a new instance.
  pub fn new<T: Any + Send + Sync>(value: T) -> Self {
    Self(Some(Arc::new(value)))
  }

  /// Wraps an already shared value without reallocating it.
  pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
    Self(Some(value))
  }

  /// The "no instance" value.
  pub fn none() -> Self {
    Self(None)
  }

  pub fn is_none(&self) -> bool {
    self.0.is_none()
  }

  pub fn is_some(&self) -> bool {
    self.0.is_some()
  }

  /// Returns `true` if the instance holds a `T`.
  pub fn is<T: Any>(&self) -> bool {
    self.type_id() == Some(TypeId::of::<T>())
  }

  /// The `TypeId` of the held value, if any.
  pub fn type_id(&self) -> Option<TypeId> {
    self.0.as_deref().map(|value| value.type_id())
  }

  /// Returns a shared handle to the held `T`.
  pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.0.clone()?.downcast::<T>().ok()
  }

  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    self.0.as_deref()?.downcast_ref::<T>()
  }

  /// Reference identity. Two empty instances are considered equal.
  pub fn ptr_eq(&self, other: &Instance) -> bool {
    match (&self.0, &other.0) {
      (Some(a), Some(b)) => Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const (),
      (None, None) => true,
      _ => false,
    }
  }

  /// Bare scalars (strings, characters, booleans and numbers).
  pub(crate) fn is_scalar(&self) -> bool {
    macro_rules! any_of {
      ($($t:ty),+) => { $(self.is::<$t>())||+ };
    }
    any_of!(
      String, &'static str, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128,
      usize, f32, f64
    )
  }
}

impl fmt::Debug for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.0 {
      Some(value) => write!(f, "Instance({:p})", Arc::as_ptr(value) as *const ()),
      None => write!(f, "Instance(None)"),
    }
  }
}
