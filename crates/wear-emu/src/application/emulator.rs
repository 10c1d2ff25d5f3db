//! Emulator: the device context and the single cooperative event loop
//! everything runs on.
//!
//! One `Emulator` owns the registry, the dispatcher (and through it the
//! display), and the receiving ends of the transport and follow-up
//! channels. `build` wires the whole device together and hands back the
//! [`HostBridge`] the host application talks to.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{debug, info};

use wear_core::{builtin_commands, decode_payload, Button, CommandRegistry, Value};

use crate::application::buttons::ButtonRouter;
use crate::application::dispatch::{Dispatcher, MenuDims, Outbound};
use crate::application::host_api::{BusOutbound, EventBus, HostBridge, HostEvent};
use crate::application::screen::{Followup, Screen};
use crate::infrastructure::clock;
use crate::infrastructure::renderer::Renderer;
use crate::infrastructure::resources::AppInfo;
use crate::infrastructure::storage::config::EmuConfig;
use crate::infrastructure::transport::{Transport, TransportConfig, TransportEvent};
use crate::infrastructure::vibration::Vibration;

pub struct Emulator {
    registry: Arc<CommandRegistry>,
    dispatcher: Dispatcher,
    buttons: ButtonRouter,
    bus: Arc<EventBus>,
    transport_events: mpsc::UnboundedReceiver<TransportEvent>,
    followups: mpsc::UnboundedReceiver<Followup>,
}

impl Emulator {
    /// Builds the device and its host bridge. Must run inside a tokio
    /// runtime (the transport spawns its delivery worker immediately).
    pub fn build(
        config: &EmuConfig,
        renderer: Arc<dyn Renderer>,
        vibration: Arc<dyn Vibration>,
        app_info: AppInfo,
    ) -> (Self, HostBridge) {
        let registry = Arc::new(builtin_commands());
        let bus = Arc::new(EventBus::new());

        let (transport, transport_events) = Transport::new(TransportConfig {
            response_delay: Duration::from_millis(config.transport.response_time_ms),
        });

        let (followup_tx, followups) = mpsc::unbounded_channel();
        let screen = Screen::new(renderer, followup_tx);
        let outbound = Arc::new(BusOutbound::new(Arc::clone(&bus))) as Arc<dyn Outbound>;
        let dispatcher = Dispatcher::new(
            Arc::clone(&registry),
            screen,
            outbound,
            vibration,
            MenuDims {
                viewport_height: config.display.height,
                item_height: config.display.menu_item_height,
            },
        );

        let bridge = HostBridge::new(Arc::new(transport), Arc::clone(&bus), app_info);
        let emulator = Self {
            registry,
            dispatcher,
            buttons: ButtonRouter::new(),
            bus,
            transport_events,
            followups,
        };
        (emulator, bridge)
    }

    /// Synchronously decodes one inbound payload and executes it. Unknown
    /// command ids are dropped without any side effect.
    pub fn receive(&mut self, payload: &[Value]) {
        match decode_payload(&self.registry, payload) {
            Some(command) => self.dispatcher.execute(&command.name, &command.params),
            None => debug!(?payload, "payload with unknown command id dropped"),
        }
    }

    /// Physical button pressed.
    pub fn press(&mut self, button: Button) {
        self.buttons.press(button);
    }

    /// Physical button released; routes the completed press.
    pub fn release(&mut self, button: Button) {
        self.buttons.release(button, &mut self.dispatcher);
    }

    /// The dispatcher, exposed for inspection by harnesses and tests.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Runs the event loop: transport deliveries, deferred animation
    /// completions, and the ~1 s heartbeat, all on one task. Returns when
    /// the transport side has shut down.
    pub async fn run(mut self) {
        self.bus.trigger(&HostEvent::Ready);
        info!("emulator ready");

        let mut heartbeat = tokio::time::interval(Duration::from_millis(clock::TICK_MS));
        loop {
            tokio::select! {
                maybe_event = self.transport_events.recv() => {
                    match maybe_event {
                        Some(TransportEvent::Sent { payload, transaction_id }) => {
                            self.bus.trigger(&HostEvent::MessageSent {
                                payload: payload.clone(),
                                transaction_id,
                            });
                            self.receive(&payload);
                        }
                        None => break,
                    }
                }
                Some(followup) = self.followups.recv() => {
                    match followup {
                        Followup::AnimationDone { window_id } => {
                            self.dispatcher.animation_done(window_id);
                        }
                    }
                }
                _ = heartbeat.tick() => {
                    self.dispatcher.status_tick();
                }
            }
        }
        info!("emulator stopped");
    }
}
