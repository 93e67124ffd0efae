//! Fwx Forward - Method forwarding for forwardx.
//!
//! Installs methods on a type or a single instance that delegate to a
//! receiver resolved on every call:
//! - Receiver classification (`ReceiverSpec`): class, identity, named field,
//!   zero-arity proc, or a fixed object
//! - Forwarding methods generated from a `ForwardSpec`
//! - The engine (`Forwarding`) with single, bulk, table-style and keyed setup
//! - The opt-in `Forwardable` trait with the `def_*delegator*` aliases
//!
//! # Example
//!
//! ```text
//! use fwx_forward::Forwardable;
//!
//! let queue = TypeRef::new("Queue");
//! queue.forward_all("items", ["len", "get"])?;
//! queue.forward_as_key("config", "timeout")?;
//! ```
//!
//! # Tracing
//!
//! Setup logs each installed method at `debug`; each forwarded call logs the
//! resolved receiver at `trace`. Call [`init_tracing`] and set `RUST_LOG`
//! (e.g. `RUST_LOG=fwx_forward=debug`) to see them.

mod config;
mod engine;
mod forward_spec;
mod forwardable;
mod receiver;
mod target;

use std::sync::Once;

pub use config::{ForwardConfig, ForwardConfigBuilder};
pub use engine::{Forwarding, MethodNames};
pub use forward_spec::ForwardSpec;
pub use forwardable::Forwardable;
pub use receiver::{IntoReceiver, ReceiverSpec};
pub use target::{Forwarder, InstallTarget};


static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Only installs a subscriber when `RUST_LOG` is set. Safe to call more
/// than once; later calls do nothing.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let installed = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
            if let Err(err) = installed {
                // Reported through whichever subscriber got there first.
                tracing::debug!(%err, "tracing subscriber already installed");
            }
        }
    });
}
