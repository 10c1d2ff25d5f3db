//! Dispatcher: the protocol interpreter.
//!
//! Receives decoded commands and interprets them as transitions over the
//! display stack. The dispatcher holds no state of its own beyond the
//! [`Screen`] – the UI state machine *is* the variant of the current
//! top-level object. Replies (echoes, lazy menu requests, animation
//! completions) leave through the [`Outbound`] port; nothing here ever
//! returns an error to the transport, and unrecognized commands are logged
//! and dropped.

use std::sync::Arc;

use tokio::time::Duration;
use tracing::{debug, info, warn};

use wear_core::domain::display::{
    ActionBar, Card, DisplayObject, ElementFields, Frame, Menu, MenuItem, MenuSection, Stage,
    WindowAttrs, WindowBody,
};
use wear_core::{Button, CommandRegistry, ObjectId, Params, Value};

use crate::application::screen::Screen;
use crate::infrastructure::vibration::Vibration;

/// Animation duration applied when the host omits one.
const DEFAULT_ANIMATION_MS: u64 = 400;

/// `stageElement` type tag for text elements – the only element type the
/// emulator materializes.
const ELEMENT_TYPE_TEXT: i64 = 3;

/// Port for device→host replies. The emulator's implementation surfaces the
/// payload to the host application synchronously; tests record it.
pub trait Outbound: Send + Sync {
    fn send(&self, payload: Vec<Value>);
}

/// Menu geometry the dispatcher needs when materializing a menu window.
#[derive(Debug, Clone, Copy)]
pub struct MenuDims {
    pub viewport_height: u32,
    pub item_height: u32,
}

pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    screen: Screen,
    outbound: Arc<dyn Outbound>,
    vibration: Arc<dyn Vibration>,
    dims: MenuDims,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<CommandRegistry>,
        screen: Screen,
        outbound: Arc<dyn Outbound>,
        vibration: Arc<dyn Vibration>,
        dims: MenuDims,
    ) -> Self {
        Self {
            registry,
            screen,
            outbound,
            vibration,
            dims,
        }
    }

    /// Read access to the display, for the button router and the runtime.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Heartbeat hook forwarded to the display's status clock.
    pub fn status_tick(&self) {
        self.screen.status_tick();
    }

    /// Executes one command against the display stack.
    pub fn execute(&mut self, name: &str, params: &Params) {
        debug!(command = name, "execute");
        match name {
            "setCard" => {
                let object = DisplayObject {
                    id: object_id(params),
                    attrs: window_attrs(params),
                    body: WindowBody::Card(card_from(params)),
                };
                self.screen.show(object);
            }

            "setStage" => {
                let object = DisplayObject {
                    id: object_id(params),
                    attrs: window_attrs(params),
                    body: WindowBody::Stage(Stage::default()),
                };
                self.screen.show(object);
            }

            "setMenu" => self.set_menu(params),
            "setMenuSection" => self.set_menu_section(params),
            "setMenuItem" => self.set_menu_item(params),

            // Requests and notifications the device sends back to the host.
            "getMenuSection" => self.reply(name, &[params.get("section").clone()]),
            "getMenuItem" => self.reply(
                name,
                &[params.get("section").clone(), params.get("item").clone()],
            ),
            "menuSelect" => self.reply(
                name,
                &[params.get("section").clone(), params.get("item").clone()],
            ),
            "stageAnimateDone" => self.reply(name, &[params.get("index").clone()]),

            "stageElement" => self.stage_element(params),
            "stageAnimate" => self.stage_animate(params),

            "windowHide" | "stageRemove" => {
                // The echo confirms the command was processed; it must leave
                // before the stack mutates.
                let id_value = params.get("id").clone();
                self.reply(name, &[id_value.clone()]);
                if let Some(id) = id_value.as_int() {
                    self.screen.hide(id);
                }
            }

            "click" | "longClick" => match button_ordinal(params.get("button")) {
                Some(ordinal) => self.reply(name, &[Value::Int(ordinal)]),
                None => warn!(command = name, "click without a recognizable button"),
            },

            "vibe" => self.vibration.vibrate(params.get("type")),

            // The weather card pulls live data over the network; the widget
            // is outside the emulator. The command keeps its wire slot.
            "setWeather" => info!("setWeather is not supported by the emulator; ignoring"),

            other => warn!(command = other, "unrecognized command"),
        }
    }

    /// Moves the menu selection by `offset` rows, if a menu is on screen.
    pub fn menu_move(&mut self, offset: isize) {
        let change = self
            .screen
            .current_mut()
            .and_then(DisplayObject::as_menu_mut)
            .and_then(|menu| menu.select(offset));
        if let Some(change) = change {
            self.screen.notify_selection(&change);
        }
    }

    /// Confirms the current menu selection to the host, if there is one.
    pub fn menu_select(&mut self) {
        let selected = self
            .screen
            .current()
            .and_then(DisplayObject::as_menu)
            .and_then(Menu::selected_item)
            .map(|item| (item.section, item.item));
        if let Some((section, item)) = selected {
            let mut params = Params::new();
            params.set("section", section).set("item", item);
            self.execute("menuSelect", &params);
        }
    }

    /// Delivers a deferred animation completion. Dropped when the owning
    /// window already left the screen – a completion must never execute
    /// against stack state that no longer exists.
    pub fn animation_done(&mut self, window_id: ObjectId) {
        if !self.screen.current().is_some_and(|o| o.id == window_id) {
            debug!(window_id, "stale animation completion dropped");
            return;
        }
        let mut params = Params::new();
        params.set("index", 0i64);
        self.execute("stageAnimateDone", &params);
    }

    // ── Command handlers ──────────────────────────────────────────────────────

    fn set_menu(&mut self, params: &Params) {
        // Definition call: the host announces the section count and the
        // device requests each section's contents lazily.
        let sections = params.int("sections").unwrap_or(0);
        if params.int("clear") == Some(-1) && sections > 0 {
            for section in 0..sections {
                let mut request = Params::new();
                request.set("section", section);
                self.execute("getMenuSection", &request);
            }
            return;
        }

        let object = DisplayObject {
            id: object_id(params),
            attrs: window_attrs(params),
            body: WindowBody::Menu(Menu::new(self.dims.viewport_height, self.dims.item_height)),
        };
        self.screen.show(object);
    }

    fn set_menu_section(&mut self, params: &Params) {
        let section = params.int("section").unwrap_or(0);
        let items = params.int("items").unwrap_or(0).max(0);

        {
            let Some(menu) = self
                .screen
                .current_mut()
                .and_then(DisplayObject::as_menu_mut)
            else {
                debug!("setMenuSection while no menu is on screen; ignoring");
                return;
            };
            menu.add_section(MenuSection {
                section,
                title: params.str("title").map(str::to_string),
                declared_items: items as usize,
            });
        }

        // Request each announced item.
        for item in 0..items {
            let mut request = Params::new();
            request.set("section", section).set("item", item);
            self.execute("getMenuItem", &request);
        }
    }

    fn set_menu_item(&mut self, params: &Params) {
        let change = {
            let Some(menu) = self
                .screen
                .current_mut()
                .and_then(DisplayObject::as_menu_mut)
            else {
                debug!("setMenuItem while no menu is on screen; ignoring");
                return;
            };
            menu.add_item(MenuItem {
                section: params.int("section").unwrap_or(0),
                item: params.int("item").unwrap_or(0),
                title: params.str("title").map(str::to_string),
                subtitle: params.str("subtitle").map(str::to_string),
                icon: params.int("icon"),
            })
        };
        if let Some(change) = change {
            self.screen.notify_selection(&change);
        }
    }

    fn stage_element(&mut self, params: &Params) {
        match params.int("type") {
            Some(ELEMENT_TYPE_TEXT) => {
                let Some(id) = params.int("id") else {
                    warn!("stageElement without an id; ignoring");
                    return;
                };
                self.screen.upsert_text_element(id, element_fields(params));
            }
            other => debug!(element_type = ?other, "unsupported stage element type"),
        }
    }

    fn stage_animate(&mut self, params: &Params) {
        let Some(id) = params.int("id") else {
            warn!("stageAnimate without an id; ignoring");
            return;
        };
        let duration = params
            .int("duration")
            .and_then(|ms| u64::try_from(ms).ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_ANIMATION_MS);
        let target = Frame {
            x: params.int("x"),
            y: params.int("y"),
            width: params.int("width"),
            height: params.int("height"),
        };
        self.screen
            .animate(id, target, Duration::from_millis(duration));
    }

    /// Sends `[command_id, args…]` out the reply port.
    fn reply(&self, command: &str, args: &[Value]) {
        let Some(schema) = self.registry.by_name(command) else {
            warn!(command, "reply for a command missing from the registry");
            return;
        };
        let mut payload = Vec::with_capacity(args.len() + 1);
        payload.push(Value::Int(i64::from(schema.id)));
        payload.extend_from_slice(args);
        self.outbound.send(payload);
    }
}

// ── Param extraction helpers ──────────────────────────────────────────────────

fn object_id(params: &Params) -> ObjectId {
    params.int("id").unwrap_or(0)
}

fn window_attrs(params: &Params) -> WindowAttrs {
    let action_bar = params.truthy("action").then(|| ActionBar {
        up_icon: params.int("actionUp"),
        select_icon: params.int("actionSelect"),
        down_icon: params.int("actionDown"),
        background_color: params.int("actionBackgroundColor"),
    });
    WindowAttrs {
        fullscreen: params.truthy("fullscreen"),
        scrollable: params.truthy("scrollable"),
        background_color: params.int("backgroundColor"),
        action_bar,
    }
}

fn card_from(params: &Params) -> Card {
    Card {
        title: params.str("title").map(str::to_string),
        subtitle: params.str("subtitle").map(str::to_string),
        body: params.str("body").map(str::to_string),
        icon: params.int("icon"),
        subicon: params.int("subicon"),
        banner: params.int("banner"),
        style: params.str("style").map(str::to_string),
    }
}

fn element_fields(params: &Params) -> ElementFields {
    ElementFields {
        frame: Frame {
            x: params.int("x"),
            y: params.int("y"),
            width: params.int("width"),
            height: params.int("height"),
        },
        text: params.str("text").map(str::to_string),
        font: params.int("font"),
        color: params.int("color"),
        background_color: params.int("backgroundColor"),
        border_color: params.int("borderColor"),
        radius: params.int("radius"),
        text_overflow: params.int("textOverflow"),
        text_align: params.int("textAlign"),
        time_units: params.int("updateTimeUnits"),
    }
}

fn button_ordinal(value: &Value) -> Option<i64> {
    match value {
        Value::Int(n) => Some(*n),
        Value::Str(name) => Button::from_name(name).map(Button::ordinal),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use tokio::sync::mpsc;

    use wear_core::builtin_commands;
    use wear_core::WindowKind;

    use crate::application::screen::Followup;
    use crate::infrastructure::renderer::{RecordingRenderer, Renderer};

    // ── Test doubles ──────────────────────────────────────────────────────────

    /// Records outbound payloads, optionally into a shared ordered log.
    #[derive(Default)]
    struct RecordingOutbound {
        payloads: Mutex<Vec<Vec<Value>>>,
        order_log: Option<Arc<Mutex<Vec<String>>>>,
    }

    impl RecordingOutbound {
        fn with_log(log: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                payloads: Mutex::new(Vec::new()),
                order_log: Some(log),
            }
        }

        fn payloads(&self) -> Vec<Vec<Value>> {
            self.payloads.lock().unwrap().clone()
        }
    }

    impl Outbound for RecordingOutbound {
        fn send(&self, payload: Vec<Value>) {
            if let Some(log) = &self.order_log {
                log.lock().unwrap().push(format!("outbound:{payload:?}"));
            }
            self.payloads.lock().unwrap().push(payload);
        }
    }

    #[derive(Default)]
    struct RecordingVibration {
        calls: Mutex<Vec<Value>>,
    }

    impl Vibration for RecordingVibration {
        fn vibrate(&self, kind: &Value) {
            self.calls.lock().unwrap().push(kind.clone());
        }
    }

    struct Harness {
        dispatcher: Dispatcher,
        outbound: Arc<RecordingOutbound>,
        renderer: Arc<RecordingRenderer>,
        vibration: Arc<RecordingVibration>,
        followups: mpsc::UnboundedReceiver<Followup>,
    }

    fn make_harness() -> Harness {
        let shared_log = Arc::new(Mutex::new(Vec::new()));
        let outbound = Arc::new(RecordingOutbound::with_log(Arc::clone(&shared_log)));
        let renderer = Arc::new(RecordingRenderer::with_log(shared_log));
        let vibration = Arc::new(RecordingVibration::default());
        let (followup_tx, followups) = mpsc::unbounded_channel();
        let screen = Screen::new(
            Arc::clone(&renderer) as Arc<dyn Renderer>,
            followup_tx,
        );
        let dispatcher = Dispatcher::new(
            Arc::new(builtin_commands()),
            screen,
            Arc::clone(&outbound) as Arc<dyn Outbound>,
            Arc::clone(&vibration) as Arc<dyn Vibration>,
            MenuDims {
                viewport_height: 168,
                item_height: 28,
            },
        );
        Harness {
            dispatcher,
            outbound,
            renderer,
            vibration,
            followups,
        }
    }

    fn params(entries: &[(&str, Value)]) -> Params {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    // ── Windows ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_set_card_shows_a_card_window() {
        // Arrange
        let mut h = make_harness();

        // Act
        h.dispatcher.execute(
            "setCard",
            &params(&[
                ("id", Value::Int(2)),
                ("title", Value::Str("Hello".into())),
                ("body", Value::Str("World".into())),
            ]),
        );

        // Assert
        let current = h.dispatcher.screen().current().expect("card on screen");
        assert_eq!(current.id, 2);
        assert_eq!(current.kind(), WindowKind::Card);
        match &current.body {
            WindowBody::Card(card) => {
                assert_eq!(card.title.as_deref(), Some("Hello"));
                assert_eq!(card.body.as_deref(), Some("World"));
            }
            other => panic!("expected a card body, got {other:?}"),
        }
        assert!(h.outbound.payloads().is_empty(), "setCard sends no reply");
    }

    #[tokio::test]
    async fn test_set_card_reads_action_bar_attrs() {
        let mut h = make_harness();

        h.dispatcher.execute(
            "setCard",
            &params(&[
                ("id", Value::Int(2)),
                ("action", Value::Bool(true)),
                ("actionUp", Value::Int(1)),
                ("actionDown", Value::Int(2)),
            ]),
        );

        let attrs = &h.dispatcher.screen().current().unwrap().attrs;
        let bar = attrs.action_bar.as_ref().expect("action bar requested");
        assert_eq!(bar.up_icon, Some(1));
        assert_eq!(bar.down_icon, Some(2));
    }

    #[tokio::test]
    async fn test_window_hide_echoes_before_stack_mutation() {
        // Arrange
        let mut h = make_harness();
        h.dispatcher
            .execute("setCard", &params(&[("id", Value::Int(3))]));

        // Act
        h.dispatcher
            .execute("windowHide", &params(&[("id", Value::Int(3))]));

        // Assert – exactly one echo [2, 3], and it precedes the hide
        assert_eq!(
            h.outbound.payloads(),
            vec![vec![Value::Int(2), Value::Int(3)]]
        );
        let entries = h.renderer.entries();
        let echo_pos = entries
            .iter()
            .position(|e| e.starts_with("outbound:"))
            .expect("echo recorded");
        let hide_pos = entries
            .iter()
            .position(|e| e == "hide:3")
            .expect("hide recorded");
        assert!(echo_pos < hide_pos, "echo must precede the stack mutation");
        assert!(h.dispatcher.screen().current().is_none());
    }

    #[tokio::test]
    async fn test_window_hide_with_stale_id_is_noop_but_still_echoes() {
        let mut h = make_harness();
        h.dispatcher
            .execute("setCard", &params(&[("id", Value::Int(7))]));

        h.dispatcher
            .execute("windowHide", &params(&[("id", Value::Int(5))]));

        assert_eq!(h.dispatcher.screen().current().unwrap().id, 7);
        assert_eq!(
            h.outbound.payloads(),
            vec![vec![Value::Int(2), Value::Int(5)]]
        );
    }

    // ── Menu flow ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_set_menu_definition_call_requests_each_section() {
        // Arrange
        let mut h = make_harness();

        // Act – definition call: clear == -1 with a section count
        h.dispatcher.execute(
            "setMenu",
            &params(&[("clear", Value::Int(-1)), ("sections", Value::Int(2))]),
        );

        // Assert – no window shown, one getMenuSection request per section
        assert!(h.dispatcher.screen().current().is_none());
        assert_eq!(
            h.outbound.payloads(),
            vec![
                vec![Value::Int(15), Value::Int(0)],
                vec![Value::Int(15), Value::Int(1)],
            ]
        );
    }

    #[tokio::test]
    async fn test_set_menu_setup_call_shows_the_menu() {
        let mut h = make_harness();

        h.dispatcher
            .execute("setMenu", &params(&[("id", Value::Int(4))]));

        let current = h.dispatcher.screen().current().unwrap();
        assert_eq!(current.kind(), WindowKind::Menu);
        assert_eq!(current.id, 4);
    }

    #[tokio::test]
    async fn test_set_menu_section_appends_and_requests_items() {
        // Arrange
        let mut h = make_harness();
        h.dispatcher
            .execute("setMenu", &params(&[("id", Value::Int(4))]));

        // Act
        h.dispatcher.execute(
            "setMenuSection",
            &params(&[
                ("section", Value::Int(0)),
                ("items", Value::Int(3)),
                ("title", Value::Str("First".into())),
            ]),
        );

        // Assert
        let menu = h.dispatcher.screen().current().unwrap().as_menu().unwrap();
        assert_eq!(menu.sections.len(), 1);
        assert_eq!(menu.sections[0].declared_items, 3);
        assert_eq!(
            h.outbound.payloads(),
            vec![
                vec![Value::Int(17), Value::Int(0), Value::Int(0)],
                vec![Value::Int(17), Value::Int(0), Value::Int(1)],
                vec![Value::Int(17), Value::Int(0), Value::Int(2)],
            ]
        );
    }

    #[tokio::test]
    async fn test_set_menu_section_without_menu_is_ignored() {
        let mut h = make_harness();
        h.dispatcher
            .execute("setCard", &params(&[("id", Value::Int(1))]));

        h.dispatcher.execute(
            "setMenuSection",
            &params(&[("section", Value::Int(0)), ("items", Value::Int(2))]),
        );

        assert!(h.outbound.payloads().is_empty());
    }

    #[tokio::test]
    async fn test_first_menu_item_selects_row_zero_and_notifies_renderer() {
        // Arrange
        let mut h = make_harness();
        h.dispatcher
            .execute("setMenu", &params(&[("id", Value::Int(4))]));

        // Act
        h.dispatcher.execute(
            "setMenuItem",
            &params(&[
                ("section", Value::Int(0)),
                ("item", Value::Int(0)),
                ("title", Value::Str("first row".into())),
            ]),
        );

        // Assert
        let menu = h.dispatcher.screen().current().unwrap().as_menu().unwrap();
        assert_eq!(menu.selected, 0);
        assert!(h.renderer.entries().contains(&"select:0".to_string()));
    }

    #[tokio::test]
    async fn test_menu_select_confirms_selected_section_and_item() {
        // Arrange
        let mut h = make_harness();
        h.dispatcher
            .execute("setMenu", &params(&[("id", Value::Int(4))]));
        h.dispatcher.execute(
            "setMenuItem",
            &params(&[("section", Value::Int(1)), ("item", Value::Int(5))]),
        );

        // Act
        h.dispatcher.menu_select();

        // Assert – [menuSelect id, section, item]
        assert_eq!(
            h.outbound.payloads(),
            vec![vec![Value::Int(18), Value::Int(1), Value::Int(5)]]
        );
    }

    #[tokio::test]
    async fn test_menu_move_out_of_range_sends_nothing() {
        let mut h = make_harness();
        h.dispatcher
            .execute("setMenu", &params(&[("id", Value::Int(4))]));
        h.dispatcher.execute(
            "setMenuItem",
            &params(&[("section", Value::Int(0)), ("item", Value::Int(0))]),
        );
        let before = h.renderer.entries();

        h.dispatcher.menu_move(-1);

        assert_eq!(h.renderer.entries(), before, "no-op move must not render");
    }

    // ── Stage flow ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_stage_element_creates_text_element() {
        let mut h = make_harness();
        h.dispatcher
            .execute("setStage", &params(&[("id", Value::Int(6))]));

        h.dispatcher.execute(
            "stageElement",
            &params(&[
                ("id", Value::Int(11)),
                ("type", Value::Int(3)),
                ("text", Value::Str("label".into())),
            ]),
        );

        let stage = h.dispatcher.screen().current().unwrap().as_stage().unwrap();
        assert_eq!(stage.elements.len(), 1);
        assert_eq!(stage.find(11).unwrap().fields.text.as_deref(), Some("label"));
    }

    #[tokio::test]
    async fn test_stage_element_of_unknown_type_is_ignored() {
        let mut h = make_harness();
        h.dispatcher
            .execute("setStage", &params(&[("id", Value::Int(6))]));

        h.dispatcher.execute(
            "stageElement",
            &params(&[("id", Value::Int(11)), ("type", Value::Int(99))]),
        );

        let stage = h.dispatcher.screen().current().unwrap().as_stage().unwrap();
        assert!(stage.elements.is_empty());
    }

    #[tokio::test]
    async fn test_stage_animate_completion_reports_done() {
        // Arrange
        let mut h = make_harness();
        h.dispatcher
            .execute("setStage", &params(&[("id", Value::Int(6))]));
        h.dispatcher.execute(
            "stageElement",
            &params(&[("id", Value::Int(11)), ("type", Value::Int(3))]),
        );

        // Act – animate with a short duration, then deliver the follow-up
        h.dispatcher.execute(
            "stageAnimate",
            &params(&[
                ("id", Value::Int(11)),
                ("x", Value::Int(20)),
                ("duration", Value::Int(5)),
            ]),
        );
        let followup = h.followups.recv().await.expect("animation completion");
        let Followup::AnimationDone { window_id } = followup;
        h.dispatcher.animation_done(window_id);

        // Assert – stageAnimateDone echo [25, 0]
        assert_eq!(
            h.outbound.payloads(),
            vec![vec![Value::Int(25), Value::Int(0)]]
        );
    }

    #[tokio::test]
    async fn test_stale_animation_done_is_dropped() {
        let mut h = make_harness();
        h.dispatcher
            .execute("setStage", &params(&[("id", Value::Int(6))]));

        // The stage has been replaced by the time the completion arrives.
        h.dispatcher
            .execute("setCard", &params(&[("id", Value::Int(7))]));
        h.dispatcher.animation_done(6);

        assert!(h.outbound.payloads().is_empty());
    }

    // ── Buttons, vibe, unknowns ───────────────────────────────────────────────

    #[tokio::test]
    async fn test_click_maps_button_names_to_ordinals() {
        let mut h = make_harness();

        h.dispatcher
            .execute("click", &params(&[("button", Value::Str("select".into()))]));
        h.dispatcher
            .execute("longClick", &params(&[("button", Value::Str("back".into()))]));

        assert_eq!(
            h.outbound.payloads(),
            vec![
                vec![Value::Int(5), Value::Int(2)],
                vec![Value::Int(6), Value::Int(0)],
            ]
        );
    }

    #[tokio::test]
    async fn test_vibe_forwards_to_the_vibration_port() {
        let mut h = make_harness();

        h.dispatcher
            .execute("vibe", &params(&[("type", Value::Str("short".into()))]));

        assert_eq!(
            h.vibration.calls.lock().unwrap().clone(),
            vec![Value::Str("short".into())]
        );
    }

    #[tokio::test]
    async fn test_unrecognized_command_is_a_noop() {
        let mut h = make_harness();
        h.dispatcher
            .execute("setCard", &params(&[("id", Value::Int(1))]));

        h.dispatcher.execute("configButtons", &Params::new());
        h.dispatcher.execute("totallyUnknown", &Params::new());

        // Stack untouched, nothing sent.
        assert_eq!(h.dispatcher.screen().current().unwrap().id, 1);
        assert!(h.outbound.payloads().is_empty());
    }

    #[tokio::test]
    async fn test_set_weather_keeps_its_slot_but_is_ignored() {
        let mut h = make_harness();

        h.dispatcher.execute(
            "setWeather",
            &params(&[("city", Value::Str("Naples".into()))]),
        );

        assert!(h.dispatcher.screen().current().is_none());
        assert!(h.outbound.payloads().is_empty());
    }
}
