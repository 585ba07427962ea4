//! Reference embedding of `float_nodes`
//!
//! - [`HostRuntime`]: object model answering the coercion protocol and
//!   dispatching dynamic sends to floats through shared operation nodes
//! - [`Complex`]: complex numbers reached from `**` and the coerce protocol
//! - [`init_tracing`]: subscriber setup for binaries and tests (`logging`
//!   feature)

#![deny(clippy::print_stderr)]

pub mod complex;
pub mod runtime;

pub use complex::Complex;
pub use runtime::HostRuntime;

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Defaults to `debug` for the float crates and `warn` elsewhere. Calling it
/// more than once is harmless.
#[cfg(feature = "logging")]
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,float_nodes=debug,float_nodes_host=debug"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_test_writer()
        .try_init();
}
