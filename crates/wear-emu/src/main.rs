//! Wearable emulator entry point.
//!
//! Wires the device together on the Tokio runtime and, as a smoke run,
//! pushes a greeting card through the simulated channel the same way a host
//! application would.
//!
//! ```text
//! main()
//!  └─ load_config()            -- TOML settings (screen, delay, log level)
//!  └─ ResourceTable::load()    -- appinfo.json media manifest, if present
//!  └─ Emulator::build()        -- registry + transport + dispatcher + bridge
//!       ├─ Emulator::run       -- event loop (Tokio task)
//!       └─ HostBridge          -- host-facing sends and listeners
//! ```

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wear_core::Value;
use wear_emu::application::emulator::Emulator;
use wear_emu::application::host_api::{EventKind, HostEvent};
use wear_emu::infrastructure::renderer::{HeadlessRenderer, Renderer};
use wear_emu::infrastructure::resources::ResourceTable;
use wear_emu::infrastructure::storage::config;
use wear_emu::infrastructure::vibration::{LogVibration, Vibration};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config()?;

    // Structured logging; RUST_LOG overrides the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cfg.emulator.log_level.clone())),
        )
        .init();

    info!("wearable emulator starting");

    // The media manifest is optional; without one, icon ids resolve to None.
    let manifest_path = Path::new(&cfg.emulator.app_info_path);
    let resources = if manifest_path.exists() {
        ResourceTable::load(manifest_path)?
    } else {
        warn!(path = %manifest_path.display(), "no app-info manifest; running without media");
        ResourceTable::default()
    };
    let app_info = resources.app_info().clone();

    let renderer = Arc::new(HeadlessRenderer::new(resources)) as Arc<dyn Renderer>;
    let vibration = Arc::new(LogVibration) as Arc<dyn Vibration>;
    let (emulator, bridge) = Emulator::build(&cfg, renderer, vibration, app_info);

    // Log every reply the device sends back to the "app".
    bridge.add_event_listener(EventKind::AppMessage, |event| {
        if let HostEvent::AppMessage { payload } = event {
            info!(?payload, "app message from device");
        }
    });

    let device = tokio::spawn(emulator.run());

    // Smoke run: show a greeting card the way a host application would.
    let setcard = vec![
        Value::Int(3),                    // setCard
        Value::Null,                      // clear
        Value::Int(1),                    // id (root window)
        Value::Null,                      // pushing
        Value::Null,                      // action
        Value::Null,                      // actionUp
        Value::Null,                      // actionSelect
        Value::Null,                      // actionDown
        Value::Null,                      // actionBackgroundColor
        Value::Null,                      // backgroundColor
        Value::Null,                      // fullscreen
        Value::Null,                      // scrollable
        Value::Str("Hello".to_string()),  // title
        Value::Null,                      // subtitle
        Value::Str("emulated wearable, reporting in".to_string()), // body
    ];
    bridge.send_app_message(
        setcard,
        Box::new(|ack| info!(transaction = %ack.transaction_id, "greeting card delivered")),
        None,
    );

    info!("emulator running; press Ctrl-C to exit");
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    device.abort();
    Ok(())
}
