//! Infrastructure layer: timers, rendering, resources, and storage.
//!
//! Contains everything that touches the outside world on behalf of the
//! application layer – the simulated transport's delay timers, the renderer
//! implementations, the app-info manifest loader, vibration output, clock
//! formatting, and TOML configuration.
//!
//! **Dependency rule**: this layer may depend on `wear_core`, but the
//! application layer reaches it only through traits and value types.

pub mod clock;
pub mod renderer;
pub mod resources;
pub mod storage;
pub mod transport;
pub mod vibration;
