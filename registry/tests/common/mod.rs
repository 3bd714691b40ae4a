// Shared helpers for the integration tests.
#![allow(dead_code)]

use fibre_registry::Container;
use once_cell::sync::Lazy;
use std::sync::Once;

static TRACING: Once = Once::new();

// Each test binary is its own process and gets its one container here.
static CONTAINER: Lazy<Container> = Lazy::new(|| {
  init_tracing();
  Container::create().expect("the container is created once per test binary")
});

/// Routes `tracing` output through the test harness. Set `RUST_LOG` to see it.
pub fn init_tracing() {
  TRACING.call_once(|| {
    let _ = tracing_subscriber::fmt()
      .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
      .with_test_writer()
      .try_init();
  });
}

/// Returns the process's container, flushed. Callers must be `#[serial]`.
pub fn container() -> &'static Container {
  let container = Lazy::force(&CONTAINER);
  container.flush();
  container
}
