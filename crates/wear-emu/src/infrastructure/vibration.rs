//! Vibration collaborator.
//!
//! The device cannot buzz a desk, so the default implementation reports
//! vibe requests through the log. The trait exists so the dispatcher stays
//! testable and a real haptics backend could be dropped in.

use tracing::info;
use wear_core::Value;

/// Port for the device's vibration motor.
pub trait Vibration: Send + Sync {
    /// Plays the requested pattern (`short`, `long`, `double`, or a raw
    /// numeric code – the emulator forwards whatever the host sent).
    fn vibrate(&self, kind: &Value);
}

/// Logs vibe requests instead of buzzing.
#[derive(Debug, Default)]
pub struct LogVibration;

impl Vibration for LogVibration {
    fn vibrate(&self, kind: &Value) {
        info!(?kind, "vibe");
    }
}
