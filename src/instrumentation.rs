//! Span tracing for the expensive paths: board expansion and search.
//!
//! Enable with `--features instrumentation`; spans are printed according to
//! `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber filtered by `RUST_LOG`. Does nothing if a
/// global subscriber is already set.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        log::warn!("a tracing subscriber is already installed");
    }
}
