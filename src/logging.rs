//! Tracing bootstrap.
//!
//! The library only emits `tracing` events. Hosts that do not install their
//! own subscriber can call [`install_tracing`] to get formatted output on
//! stderr, filtered by `RUST_LOG`.

use core::any::Any;
use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static TRACING_INSTALLED: Once = Once::new();

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Idempotent. If another global subscriber is already installed it is left
/// in place.
pub fn install_tracing() {
    TRACING_INSTALLED.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let result = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_filter(filter))
            .try_init();

        if result.is_err() {
            tracing::debug!("global tracing subscriber already installed");
        }
    });
}

/// Extracts the message of a caught panic.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}
