//! Recording renderer for tests.
//!
//! Captures every callback as a compact log entry so tests can assert both
//! *what* the emulator reported and *in which order*. Animations run on real
//! (usually shortened) timers, keeping completion and abort semantics
//! identical to the headless renderer.

use std::sync::{Arc, Mutex};

use tokio::task::AbortHandle;
use tokio::time::Duration;

use wear_core::domain::display::{DisplayObject, ElementFields, Frame, SelectionChange};
use wear_core::ObjectId;

use super::{DoneCallback, Renderer};

/// A [`Renderer`] that appends one entry per callback to a shared log.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer that appends to an externally shared log, letting
    /// tests interleave renderer entries with entries from other recorders.
    pub fn with_log(log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { log }
    }

    /// Snapshot of the recorded entries in arrival order.
    pub fn entries(&self) -> Vec<String> {
        self.log.lock().expect("lock poisoned").clone()
    }

    fn push(&self, entry: String) {
        self.log.lock().expect("lock poisoned").push(entry);
    }
}

impl Renderer for RecordingRenderer {
    fn on_show(&self, object: &DisplayObject) {
        self.push(format!("show:{}", object.id));
    }

    fn on_hide(&self, id: ObjectId) {
        self.push(format!("hide:{id}"));
    }

    fn on_element_update(&self, id: ObjectId, fields: &ElementFields) {
        self.push(format!(
            "element:{id}:{}",
            fields.text.as_deref().unwrap_or("")
        ));
    }

    fn on_animate(
        &self,
        id: ObjectId,
        _target: Frame,
        duration: Duration,
        on_done: DoneCallback,
    ) -> AbortHandle {
        self.push(format!("animate:{id}"));
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            on_done();
        })
        .abort_handle()
    }

    fn on_menu_selection(&self, change: &SelectionChange) {
        self.push(format!("select:{}", change.current));
    }

    fn on_status_time(&self, text: &str) {
        self.push(format!("clock:{text}"));
    }
}
