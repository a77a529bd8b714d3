//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,myflix_core=info,myflix_application=info";

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` overrides `default_filter`. Calling this more than once is
/// harmless; later calls leave the first subscriber in place.
pub fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init();
}
