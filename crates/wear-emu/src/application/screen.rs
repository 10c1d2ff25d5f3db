//! Screen: single writer over the display stack.
//!
//! Owns the [`DisplayStack`], reflects every mutation to the renderer, and
//! keeps the timer task handles (animations, time-text refresh) that belong
//! to the window currently on screen. Handles are aborted strictly before
//! their owner is detached, so no completion callback can ever observe a
//! window that is no longer there.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::Duration;
use tracing::debug;

use wear_core::domain::display::{
    DisplayObject, DisplayStack, ElementFields, ElementKind, Frame, SelectionChange, StageElement,
};
use wear_core::ObjectId;

use crate::infrastructure::clock;
use crate::infrastructure::renderer::Renderer;

/// Deferred dispatcher work produced by timer completions. Delivered through
/// the emulator's event loop so it executes against current stack state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Followup {
    /// An element animation finished while `window_id` was on screen.
    AnimationDone { window_id: ObjectId },
}

pub struct Screen {
    stack: DisplayStack,
    renderer: Arc<dyn Renderer>,
    /// Timer handles owned by the window with the given id.
    tasks: HashMap<ObjectId, Vec<AbortHandle>>,
    followup_tx: mpsc::UnboundedSender<Followup>,
}

impl Screen {
    pub fn new(renderer: Arc<dyn Renderer>, followup_tx: mpsc::UnboundedSender<Followup>) -> Self {
        Self {
            stack: DisplayStack::new(),
            renderer,
            tasks: HashMap::new(),
            followup_tx,
        }
    }

    pub fn current(&self) -> Option<&DisplayObject> {
        self.stack.current()
    }

    pub fn current_mut(&mut self) -> Option<&mut DisplayObject> {
        self.stack.current_mut()
    }

    /// Replaces whatever is on screen with `object`.
    ///
    /// The previous object's tasks are stopped before it is detached.
    pub fn show(&mut self, object: DisplayObject) {
        if let Some(prev_id) = self.stack.current().map(|o| o.id) {
            self.stop_tasks(prev_id);
        }
        if let Some(replaced) = self.stack.show(object) {
            self.renderer.on_hide(replaced.id);
        }
        let current = self
            .stack
            .current()
            .expect("stack cannot be empty immediately after show");
        self.renderer.on_show(current);
    }

    /// Removes the current object if its id matches. Stops the object's
    /// tasks first; a mismatched id leaves the stack untouched.
    pub fn hide(&mut self, id: ObjectId) -> bool {
        if !self.stack.current().is_some_and(|o| o.id == id) {
            debug!(id, "hide requested for a non-current window; ignoring");
            return false;
        }
        self.stop_tasks(id);
        self.stack.hide(id);
        self.renderer.on_hide(id);
        true
    }

    /// Creates or updates a text element on the current stage.
    ///
    /// A new element whose `time_units` mask is positive becomes a time
    /// text: a refresh task re-renders its strftime pattern once a second
    /// until the owning window leaves the screen.
    pub fn upsert_text_element(&mut self, element_id: ObjectId, fields: ElementFields) {
        let Some(window) = self.stack.current_mut() else {
            return;
        };
        let window_id = window.id;
        let Some(stage) = window.as_stage_mut() else {
            return;
        };

        let mut refresh_pattern = None;
        if let Some(existing) = stage.find_mut(element_id) {
            existing.apply(&fields);
            let snapshot = existing.fields.clone();
            self.renderer.on_element_update(element_id, &snapshot);
        } else {
            let is_time_text = fields.time_units.is_some_and(|mask| mask > 0);
            let kind = if is_time_text {
                refresh_pattern = Some(fields.text.clone().unwrap_or_default());
                ElementKind::TimeText
            } else {
                ElementKind::Text
            };
            stage.push(StageElement {
                id: element_id,
                kind,
                fields: fields.clone(),
            });
            self.renderer.on_element_update(element_id, &fields);
        }

        if let Some(pattern) = refresh_pattern {
            let handle = self.spawn_time_refresh(element_id, pattern);
            self.tasks.entry(window_id).or_default().push(handle);
        }
    }

    /// Starts an animation of the addressed element toward `target`. The
    /// completion is routed through the follow-up channel, tagged with the
    /// owning window so stale completions can be discarded.
    pub fn animate(&mut self, element_id: ObjectId, target: Frame, duration: Duration) {
        let Some(window_id) = self.stack.current().map(|o| o.id) else {
            return;
        };
        let followup_tx = self.followup_tx.clone();
        let handle = self.renderer.on_animate(
            element_id,
            target,
            duration,
            Box::new(move || {
                let _ = followup_tx.send(Followup::AnimationDone { window_id });
            }),
        );
        self.tasks.entry(window_id).or_default().push(handle);
    }

    /// Forwards a menu selection change to the renderer.
    pub fn notify_selection(&self, change: &SelectionChange) {
        self.renderer.on_menu_selection(change);
    }

    /// Heartbeat hook: updates the status-bar clock.
    pub fn status_tick(&self) {
        self.renderer.on_status_time(&clock::status_line(Local::now()));
    }

    fn spawn_time_refresh(&self, element_id: ObjectId, pattern: String) -> AbortHandle {
        let renderer = Arc::clone(&self.renderer);
        let handle = tokio::spawn(async move {
            let mut tick =
                tokio::time::interval(tokio::time::Duration::from_millis(clock::TICK_MS));
            loop {
                tick.tick().await;
                let fields = ElementFields {
                    text: Some(clock::format_time(&pattern, Local::now())),
                    ..ElementFields::default()
                };
                renderer.on_element_update(element_id, &fields);
            }
        });
        handle.abort_handle()
    }

    fn stop_tasks(&mut self, id: ObjectId) {
        if let Some(handles) = self.tasks.remove(&id) {
            for handle in handles {
                handle.abort();
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use crate::infrastructure::renderer::RecordingRenderer;
    use wear_core::domain::display::{Card, Stage, WindowAttrs, WindowBody};

    fn card(id: ObjectId) -> DisplayObject {
        DisplayObject {
            id,
            attrs: WindowAttrs::default(),
            body: WindowBody::Card(Card::default()),
        }
    }

    fn stage(id: ObjectId) -> DisplayObject {
        DisplayObject {
            id,
            attrs: WindowAttrs::default(),
            body: WindowBody::Stage(Stage::default()),
        }
    }

    fn make_screen() -> (
        Screen,
        Arc<RecordingRenderer>,
        mpsc::UnboundedReceiver<Followup>,
    ) {
        let renderer = Arc::new(RecordingRenderer::default());
        let (tx, rx) = mpsc::unbounded_channel();
        let screen = Screen::new(Arc::clone(&renderer) as Arc<dyn Renderer>, tx);
        (screen, renderer, rx)
    }

    #[tokio::test]
    async fn test_show_replaces_previous_and_reports_both() {
        let (mut screen, renderer, _rx) = make_screen();

        screen.show(card(1));
        screen.show(card(2));

        assert_eq!(renderer.entries(), vec!["show:1", "hide:1", "show:2"]);
        assert_eq!(screen.current().unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_hide_mismatched_id_leaves_stack_unchanged() {
        let (mut screen, renderer, _rx) = make_screen();
        screen.show(card(7));

        assert!(!screen.hide(5));

        assert_eq!(screen.current().unwrap().id, 7);
        assert_eq!(renderer.entries(), vec!["show:7"]);
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates_element() {
        let (mut screen, renderer, _rx) = make_screen();
        screen.show(stage(3));

        screen.upsert_text_element(
            10,
            ElementFields {
                text: Some("first".into()),
                ..ElementFields::default()
            },
        );
        screen.upsert_text_element(
            10,
            ElementFields {
                text: Some("second".into()),
                ..ElementFields::default()
            },
        );

        let stage_ref = screen.current().unwrap().as_stage().unwrap();
        assert_eq!(stage_ref.elements.len(), 1, "update must not duplicate");
        assert_eq!(
            stage_ref.find(10).unwrap().fields.text.as_deref(),
            Some("second")
        );
        assert_eq!(
            renderer.entries(),
            vec!["show:3", "element:10:first", "element:10:second"]
        );
    }

    #[tokio::test]
    async fn test_upsert_outside_a_stage_is_noop() {
        let (mut screen, renderer, _rx) = make_screen();
        screen.show(card(1));

        screen.upsert_text_element(10, ElementFields::default());

        assert_eq!(renderer.entries(), vec!["show:1"]);
    }

    #[tokio::test]
    async fn test_animation_completion_arrives_tagged_with_owner() {
        let (mut screen, _renderer, mut rx) = make_screen();
        screen.show(stage(4));

        screen.animate(10, Frame::default(), Duration::from_millis(5));

        let followup = rx.recv().await.expect("completion must arrive");
        assert_eq!(followup, Followup::AnimationDone { window_id: 4 });
    }

    #[tokio::test]
    async fn test_hide_aborts_inflight_animation() {
        let (mut screen, _renderer, mut rx) = make_screen();
        screen.show(stage(4));
        screen.animate(10, Frame::default(), Duration::from_millis(30));

        // Hide before the animation deadline: the completion must never fire.
        assert!(screen.hide(4));
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(rx.try_recv().is_err(), "aborted animation must not complete");
    }

    #[tokio::test]
    async fn test_show_aborts_previous_windows_animations() {
        let (mut screen, _renderer, mut rx) = make_screen();
        screen.show(stage(4));
        screen.animate(10, Frame::default(), Duration::from_millis(30));

        screen.show(card(5));
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(rx.try_recv().is_err());
    }
}
