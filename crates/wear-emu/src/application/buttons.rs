//! Button routing: press/release pairing and navigation interception.
//!
//! The router sits between the physical buttons and the dispatcher. It
//! classifies each press/release pair by hold duration, and applies the two
//! navigation rules that never reach the host as plain clicks: the back
//! button dismisses the current window (unless it is the root), and a menu
//! on screen captures up/down/select to drive its selection.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use wear_core::{Button, ClickKind, Params, WindowKind, ROOT_WINDOW_ID};

use crate::application::dispatch::Dispatcher;

#[derive(Debug, Default)]
pub struct ButtonRouter {
    pressed: HashMap<Button, Instant>,
}

impl ButtonRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a button press.
    pub fn press(&mut self, button: Button) {
        self.pressed.insert(button, Instant::now());
    }

    /// Completes a press/release pair and routes the resulting input.
    pub fn release(&mut self, button: Button, dispatcher: &mut Dispatcher) {
        let Some(pressed_at) = self.pressed.remove(&button) else {
            debug!(?button, "release without a matching press; ignoring");
            return;
        };
        self.deliver(button, pressed_at.elapsed(), dispatcher);
    }

    /// Routes one completed press with an explicit hold duration.
    pub fn deliver(&mut self, button: Button, held: Duration, dispatcher: &mut Dispatcher) {
        // Back dismisses the current window, except the root.
        if button == Button::Back {
            if let Some(window) = dispatcher.screen().current() {
                if window.id != ROOT_WINDOW_ID {
                    let command = match window.kind() {
                        WindowKind::Stage => "stageRemove",
                        WindowKind::Card | WindowKind::Menu => "windowHide",
                    };
                    let mut params = Params::new();
                    params.set("id", window.id);
                    dispatcher.execute(command, &params);
                    return;
                }
            }
        }

        // A menu on screen captures the navigation buttons.
        let menu_active = dispatcher
            .screen()
            .current()
            .is_some_and(|w| w.kind() == WindowKind::Menu);
        if menu_active {
            match button {
                Button::Up => {
                    dispatcher.menu_move(-1);
                    return;
                }
                Button::Down => {
                    dispatcher.menu_move(1);
                    return;
                }
                Button::Select => {
                    dispatcher.menu_select();
                    return;
                }
                // Back on the root menu falls through to the click path.
                Button::Back => {}
            }
        }

        let kind = ClickKind::classify(held);
        let mut params = Params::new();
        params.set("button", button.name());
        dispatcher.execute(kind.command_name(), &params);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use tokio::sync::mpsc;

    use wear_core::{builtin_commands, Value};

    use crate::application::dispatch::{MenuDims, Outbound};
    use crate::application::screen::Screen;
    use crate::infrastructure::renderer::{RecordingRenderer, Renderer};
    use crate::infrastructure::vibration::{LogVibration, Vibration};

    #[derive(Default)]
    struct RecordingOutbound {
        payloads: Mutex<Vec<Vec<Value>>>,
    }

    impl RecordingOutbound {
        fn payloads(&self) -> Vec<Vec<Value>> {
            self.payloads.lock().unwrap().clone()
        }
    }

    impl Outbound for RecordingOutbound {
        fn send(&self, payload: Vec<Value>) {
            self.payloads.lock().unwrap().push(payload);
        }
    }

    fn make_dispatcher() -> (Dispatcher, Arc<RecordingOutbound>) {
        let outbound = Arc::new(RecordingOutbound::default());
        let (followup_tx, _followup_rx) = mpsc::unbounded_channel();
        let screen = Screen::new(
            Arc::new(RecordingRenderer::new()) as Arc<dyn Renderer>,
            followup_tx,
        );
        let dispatcher = Dispatcher::new(
            Arc::new(builtin_commands()),
            screen,
            Arc::clone(&outbound) as Arc<dyn Outbound>,
            Arc::new(LogVibration) as Arc<dyn Vibration>,
            MenuDims {
                viewport_height: 168,
                item_height: 28,
            },
        );
        (dispatcher, outbound)
    }

    fn show_card(dispatcher: &mut Dispatcher, id: i64) {
        let mut params = Params::new();
        params.set("id", id);
        dispatcher.execute("setCard", &params);
    }

    fn show_menu_with_items(dispatcher: &mut Dispatcher, id: i64, items: i64) {
        let mut params = Params::new();
        params.set("id", id);
        dispatcher.execute("setMenu", &params);
        for i in 0..items {
            let mut item = Params::new();
            item.set("section", 0i64).set("item", i);
            dispatcher.execute("setMenuItem", &item);
        }
    }

    // ── Click classification ──────────────────────────────────────────────────

    #[tokio::test]
    async fn test_749_ms_release_dispatches_click() {
        let (mut dispatcher, outbound) = make_dispatcher();
        let mut router = ButtonRouter::new();

        router.deliver(Button::Select, Duration::from_millis(749), &mut dispatcher);

        // click echo: [5, select ordinal]
        assert_eq!(
            outbound.payloads(),
            vec![vec![Value::Int(5), Value::Int(2)]]
        );
    }

    #[tokio::test]
    async fn test_750_ms_release_dispatches_long_click() {
        let (mut dispatcher, outbound) = make_dispatcher();
        let mut router = ButtonRouter::new();

        router.deliver(Button::Select, Duration::from_millis(750), &mut dispatcher);

        // longClick echo: [6, select ordinal]
        assert_eq!(
            outbound.payloads(),
            vec![vec![Value::Int(6), Value::Int(2)]]
        );
    }

    #[tokio::test]
    async fn test_release_without_press_is_ignored() {
        let (mut dispatcher, outbound) = make_dispatcher();
        let mut router = ButtonRouter::new();

        router.release(Button::Up, &mut dispatcher);

        assert!(outbound.payloads().is_empty());
    }

    #[tokio::test]
    async fn test_press_then_release_classifies_by_real_hold() {
        let (mut dispatcher, outbound) = make_dispatcher();
        let mut router = ButtonRouter::new();

        router.press(Button::Down);
        router.release(Button::Down, &mut dispatcher);

        // An immediate release is far below the threshold: a click.
        assert_eq!(
            outbound.payloads(),
            vec![vec![Value::Int(5), Value::Int(3)]]
        );
    }

    // ── Back navigation ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_back_hides_a_non_root_card() {
        let (mut dispatcher, outbound) = make_dispatcher();
        let mut router = ButtonRouter::new();
        show_card(&mut dispatcher, 3);

        router.deliver(Button::Back, Duration::from_millis(10), &mut dispatcher);

        // windowHide echo [2, 3], and the card left the screen.
        assert_eq!(
            outbound.payloads(),
            vec![vec![Value::Int(2), Value::Int(3)]]
        );
        assert!(dispatcher.screen().current().is_none());
    }

    #[tokio::test]
    async fn test_back_removes_a_non_root_stage() {
        let (mut dispatcher, outbound) = make_dispatcher();
        let mut router = ButtonRouter::new();
        let mut params = Params::new();
        params.set("id", 6i64);
        dispatcher.execute("setStage", &params);

        router.deliver(Button::Back, Duration::from_millis(10), &mut dispatcher);

        // stageRemove echo [23, 6]
        assert_eq!(
            outbound.payloads(),
            vec![vec![Value::Int(23), Value::Int(6)]]
        );
        assert!(dispatcher.screen().current().is_none());
    }

    #[tokio::test]
    async fn test_back_on_root_window_falls_through_to_click() {
        let (mut dispatcher, outbound) = make_dispatcher();
        let mut router = ButtonRouter::new();
        show_card(&mut dispatcher, ROOT_WINDOW_ID);

        router.deliver(Button::Back, Duration::from_millis(10), &mut dispatcher);

        // The root stays; the host sees a plain back click [5, 0].
        assert_eq!(
            outbound.payloads(),
            vec![vec![Value::Int(5), Value::Int(0)]]
        );
        assert_eq!(dispatcher.screen().current().unwrap().id, ROOT_WINDOW_ID);
    }

    // ── Menu interception ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_menu_captures_up_and_down_for_selection() {
        let (mut dispatcher, outbound) = make_dispatcher();
        let mut router = ButtonRouter::new();
        show_menu_with_items(&mut dispatcher, ROOT_WINDOW_ID, 3);

        router.deliver(Button::Down, Duration::from_millis(10), &mut dispatcher);
        router.deliver(Button::Down, Duration::from_millis(10), &mut dispatcher);
        router.deliver(Button::Up, Duration::from_millis(10), &mut dispatcher);

        // No click echoes – selection moved 0 → 1 → 2 → 1.
        assert!(outbound.payloads().is_empty());
        let menu = dispatcher.screen().current().unwrap().as_menu().unwrap();
        assert_eq!(menu.selected, 1);
    }

    #[tokio::test]
    async fn test_menu_select_button_confirms_selection() {
        let (mut dispatcher, outbound) = make_dispatcher();
        let mut router = ButtonRouter::new();
        show_menu_with_items(&mut dispatcher, ROOT_WINDOW_ID, 2);

        router.deliver(Button::Select, Duration::from_millis(10), &mut dispatcher);

        // menuSelect [18, section, item] for the auto-selected first row.
        assert_eq!(
            outbound.payloads(),
            vec![vec![Value::Int(18), Value::Int(0), Value::Int(0)]]
        );
    }

    #[tokio::test]
    async fn test_back_dismisses_a_non_root_menu() {
        let (mut dispatcher, outbound) = make_dispatcher();
        let mut router = ButtonRouter::new();
        show_menu_with_items(&mut dispatcher, 9, 2);

        router.deliver(Button::Back, Duration::from_millis(10), &mut dispatcher);

        // Back wins over menu interception for non-root windows.
        assert_eq!(
            outbound.payloads(),
            vec![vec![Value::Int(2), Value::Int(9)]]
        );
        assert!(dispatcher.screen().current().is_none());
    }
}
