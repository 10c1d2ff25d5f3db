//! Renderer collaborator interface.
//!
//! Everything visual is outside the emulator core: widget drawing, CSS-style
//! animation playback, and styling are a renderer's problem. The emulator
//! only reports state changes through this trait and expects the renderer to
//! call back when an animation it was asked to play has finished.

use tokio::task::AbortHandle;
use tokio::time::Duration;

use wear_core::domain::display::{DisplayObject, ElementFields, Frame, SelectionChange};
use wear_core::ObjectId;

pub mod headless;
pub mod recording;

pub use headless::HeadlessRenderer;
pub use recording::RecordingRenderer;

/// Invoked by the renderer exactly once when an animation completes.
pub type DoneCallback = Box<dyn FnOnce() + Send + 'static>;

/// Consumer of display state changes.
///
/// Implementations must not assume the addressed object still exists by the
/// time an animation completes; the emulator guards its own callbacks, and
/// cancels in-flight animations through the returned [`AbortHandle`] before
/// detaching their owner.
pub trait Renderer: Send + Sync {
    /// A new top-level object replaced whatever was on screen.
    fn on_show(&self, object: &DisplayObject);

    /// The top-level object with this id left the screen.
    fn on_hide(&self, id: ObjectId);

    /// A stage element was created or updated.
    fn on_element_update(&self, id: ObjectId, fields: &ElementFields);

    /// Animate the addressed element's geometry over `duration`, then call
    /// `on_done`. Returns a handle the emulator aborts when the owning
    /// window is detached mid-flight.
    fn on_animate(
        &self,
        id: ObjectId,
        target: Frame,
        duration: Duration,
        on_done: DoneCallback,
    ) -> AbortHandle;

    /// The menu selection moved: un-mark `change.previous`, mark
    /// `change.current`, and scroll the content to `change.scroll_top`.
    fn on_menu_selection(&self, change: &SelectionChange);

    /// Heartbeat update for the status-bar clock.
    fn on_status_time(&self, text: &str);
}
