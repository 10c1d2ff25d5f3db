//! Headless renderer: log-only output plus real animation timing.
//!
//! Used by the binary and by end-to-end runs without a UI. Animations are
//! "played" by sleeping for their duration on the runtime, which keeps the
//! completion path (and its cancellation) identical to a real renderer's.

use tokio::task::AbortHandle;
use tokio::time::Duration;
use tracing::{debug, info};

use wear_core::domain::display::{DisplayObject, ElementFields, Frame, SelectionChange};
use wear_core::{ObjectId, WindowKind};

use super::{DoneCallback, Renderer};

use crate::infrastructure::resources::ResourceTable;

/// Renderer that narrates the display through the log.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    resources: ResourceTable,
}

impl HeadlessRenderer {
    pub fn new(resources: ResourceTable) -> Self {
        Self { resources }
    }

    fn describe(&self, object: &DisplayObject) -> String {
        match object.kind() {
            WindowKind::Card => "card".to_string(),
            WindowKind::Menu => "menu".to_string(),
            WindowKind::Stage => "stage".to_string(),
        }
    }
}

impl Renderer for HeadlessRenderer {
    fn on_show(&self, object: &DisplayObject) {
        info!(id = object.id, kind = %self.describe(object), "show");
        if let wear_core::WindowBody::Card(card) = &object.body {
            if let Some(icon) = card.icon {
                // Resolve eagerly so a bad media id is visible in the log.
                debug!(icon = ?self.resources.resolve_icon(icon), "card icon");
            }
            if let Some(title) = &card.title {
                info!(title = %title, "card title");
            }
        }
    }

    fn on_hide(&self, id: ObjectId) {
        info!(id, "hide");
    }

    fn on_element_update(&self, id: ObjectId, fields: &ElementFields) {
        debug!(id, text = fields.text.as_deref(), "element update");
    }

    fn on_animate(
        &self,
        id: ObjectId,
        target: Frame,
        duration: Duration,
        on_done: DoneCallback,
    ) -> AbortHandle {
        debug!(id, ?target, ?duration, "animate");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            on_done();
        });
        handle.abort_handle()
    }

    fn on_menu_selection(&self, change: &SelectionChange) {
        debug!(
            from = ?change.previous,
            to = change.current,
            scroll_top = change.scroll_top,
            "menu selection"
        );
    }

    fn on_status_time(&self, text: &str) {
        debug!(text, "status clock");
    }
}
