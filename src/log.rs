//! Renderer logging.
//!
//! With the `tracing` feature the renderer reports at three levels:
//! - `warn!`: request input was clamped (term counts out of range)
//! - `debug!`: one event per render stage (geometry, fit, font load, PNG size)
//! - `trace!`: one event per painted layer
//!
//! Without the feature every macro expands to nothing, so the library has no
//! logging dependency and no formatting cost. The server always enables it.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, trace, warn};
