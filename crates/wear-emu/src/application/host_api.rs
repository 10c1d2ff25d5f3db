//! Host application facade.
//!
//! This is the API surface the host application programs against: event
//! listeners, `send_app_message`, the app-info manifest, and the account
//! token. Device→host replies arrive as [`HostEvent::AppMessage`] through
//! the same bus.

use std::sync::{Arc, Mutex};

use tracing::info;

use wear_core::{TransactionId, Value};

use crate::application::dispatch::Outbound;
use crate::infrastructure::resources::AppInfo;
use crate::infrastructure::transport::{AckCallback, NackCallback, Transport};

/// Account token reported for the simulated user. The device has no account
/// backend, so the token is fixed.
pub const ACCOUNT_TOKEN: &str = "00000000000000000000000000000000";

/// The event types a host application can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The emulator finished starting up.
    Ready,
    /// A message from the device arrived for the host.
    AppMessage,
    /// A host message finished transiting the channel (its ack has fired).
    MessageSent,
}

/// Events delivered to host listeners.
#[derive(Debug, Clone)]
pub enum HostEvent {
    Ready,
    AppMessage {
        payload: Vec<Value>,
    },
    MessageSent {
        payload: Vec<Value>,
        transaction_id: TransactionId,
    },
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::Ready => EventKind::Ready,
            HostEvent::AppMessage { .. } => EventKind::AppMessage,
            HostEvent::MessageSent { .. } => EventKind::MessageSent,
        }
    }
}

type Listener = Arc<dyn Fn(&HostEvent) + Send + Sync>;

/// Listener registry with single-handler dispatch: for each event, only the
/// first listener registered for its kind fires. Host applications register
/// one handler per event type.
#[derive(Default)]
pub struct EventBus {
    listeners: Mutex<Vec<(EventKind, Listener)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for one event kind.
    pub fn add_listener(
        &self,
        kind: EventKind,
        listener: impl Fn(&HostEvent) + Send + Sync + 'static,
    ) {
        self.listeners
            .lock()
            .expect("lock poisoned")
            .push((kind, Arc::new(listener)));
    }

    /// Delivers `event` to the first matching listener, if any.
    pub fn trigger(&self, event: &HostEvent) {
        let matching = {
            let listeners = self.listeners.lock().expect("lock poisoned");
            listeners
                .iter()
                .find(|(kind, _)| *kind == event.kind())
                .map(|(_, listener)| Arc::clone(listener))
        };
        // The lock is released before the callback runs, so listeners may
        // register further listeners.
        if let Some(listener) = matching {
            listener(event);
        }
    }
}

/// Device→host reply port: replies surface synchronously as `AppMessage`
/// events on the bus.
pub struct BusOutbound {
    bus: Arc<EventBus>,
}

impl BusOutbound {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self { bus }
    }
}

impl Outbound for BusOutbound {
    fn send(&self, payload: Vec<Value>) {
        self.bus.trigger(&HostEvent::AppMessage { payload });
    }
}

/// The handle a host application holds.
pub struct HostBridge {
    transport: Arc<Transport>,
    bus: Arc<EventBus>,
    app_info: AppInfo,
}

impl HostBridge {
    pub fn new(transport: Arc<Transport>, bus: Arc<EventBus>, app_info: AppInfo) -> Self {
        Self {
            transport,
            bus,
            app_info,
        }
    }

    /// Registers a listener for `kind` events.
    pub fn add_event_listener(
        &self,
        kind: EventKind,
        listener: impl Fn(&HostEvent) + Send + Sync + 'static,
    ) {
        self.bus.add_listener(kind, listener);
    }

    /// Sends a payload to the device. `on_ack` fires once after the channel
    /// delay; `on_nack` is part of the signature but never invoked.
    pub fn send_app_message(
        &self,
        payload: Vec<Value>,
        on_ack: AckCallback,
        on_nack: Option<NackCallback>,
    ) -> TransactionId {
        self.transport.send(payload, on_ack, on_nack)
    }

    /// The host application's parsed manifest.
    pub fn get_app_info(&self) -> &AppInfo {
        &self.app_info
    }

    /// The account token bound to the simulated device.
    pub fn get_account_token(&self) -> &'static str {
        ACCOUNT_TOKEN
    }

    /// Simple notifications have no emulated surface; the request is logged.
    pub fn show_simple_notification(&self, title: &str, text: &str) {
        info!(title, text, "simple notification requested");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
