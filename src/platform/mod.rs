//! Platform glue: process-wide logging setup, frame pacing and the optional desktop frontend.

use std::time::Duration;

use tracing::subscriber::SetGlobalDefaultError;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use crate::formatter::TickFormatter;

#[cfg(feature = "sdl")]
pub mod sdl;

/// Installs the global tracing subscriber.
///
/// Filtering follows `RUST_LOG` and defaults to `info`. Lines are prefixed with the wall-clock
/// time and the current game tick.
pub fn init_tracing() -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .event_format(TickFormatter)
        .with_env_filter(filter)
        .finish()
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
}

/// Sleeps for `duration` with sub-millisecond accuracy.
pub fn sleep(duration: Duration) {
    spin_sleep::sleep(duration);
}
