//! The process-wide single-instance guard.
//!
//! A process gets exactly one `Container`. The first successful
//! `Container::create` claims it for the rest of the process; dropping the
//! container does not give it back. The owner (usually the application's
//! composition root) keeps it alive and hands it out by reference, and
//! `flush` resets its state when a clean registry is needed.

use crate::error::ContainerError;
use std::sync::atomic::{AtomicBool, Ordering};

static CONTAINER_CREATED: AtomicBool = AtomicBool::new(false);

/// Claims the process's container. Fails if it was already claimed.
pub(crate) fn claim() -> Result<(), ContainerError> {
  CONTAINER_CREATED
    .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
    .map(|_| ())
    .map_err(|_| ContainerError::AlreadyExists)
}

/// Returns `true` once the process's container has been created.
pub fn container_exists() -> bool {
  CONTAINER_CREATED.load(Ordering::Acquire)
}
