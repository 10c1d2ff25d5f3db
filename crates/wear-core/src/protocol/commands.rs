//! The built-in command table.
//!
//! Declaration order is the wire contract: the position of a command in this
//! table is its wire id, and the position of a parameter within its command
//! is its wire ordinal. Reordering or removing entries breaks every host
//! application compiled against this protocol version, so additions go at
//! the end and dead entries keep their slot (see `setWeather`).

use crate::protocol::coerce::Coercion;
use crate::protocol::registry::{CommandDecl, CommandRegistry, ParamDecl};

/// Shared leading parameters for every window-producing command.
fn window_params() -> Vec<ParamDecl> {
    vec![
        ParamDecl::raw("clear"),
        ParamDecl::raw("id"),
        ParamDecl::typed("pushing", Coercion::Bool),
        ParamDecl::typed("action", Coercion::Bool),
        ParamDecl::typed("actionUp", Coercion::MediaId),
        ParamDecl::typed("actionSelect", Coercion::MediaId),
        ParamDecl::typed("actionDown", Coercion::MediaId),
        ParamDecl::typed("actionBackgroundColor", Coercion::Color),
        ParamDecl::typed("backgroundColor", Coercion::Color),
        ParamDecl::typed("fullscreen", Coercion::Bool),
        ParamDecl::typed("scrollable", Coercion::Bool),
    ]
}

fn card_params() -> Vec<ParamDecl> {
    let mut params = window_params();
    params.extend([
        ParamDecl::typed("title", Coercion::Text),
        ParamDecl::typed("subtitle", Coercion::Text),
        ParamDecl::typed("body", Coercion::Text),
        ParamDecl::typed("icon", Coercion::MediaId),
        ParamDecl::typed("subicon", Coercion::MediaId),
        ParamDecl::typed("banner", Coercion::MediaId),
        ParamDecl::raw("style"),
    ]);
    params
}

fn weather_params() -> Vec<ParamDecl> {
    let mut params = window_params();
    params.push(ParamDecl::typed("city", Coercion::Text));
    params
}

fn menu_params() -> Vec<ParamDecl> {
    let mut params = window_params();
    params.push(ParamDecl::raw("sections"));
    params
}

/// Builds the registry for protocol version 1.
pub fn builtin_commands() -> CommandRegistry {
    CommandRegistry::build(vec![
        CommandDecl {
            name: "setWindow",
            params: window_params(),
        },
        CommandDecl {
            name: "windowShow",
            params: vec![ParamDecl::raw("id")],
        },
        CommandDecl {
            name: "windowHide",
            params: vec![ParamDecl::raw("id")],
        },
        CommandDecl {
            name: "setCard",
            params: card_params(),
        },
        // Network-backed weather card. The widget itself is outside the
        // emulator; the slot stays so ids 5+ do not shift.
        CommandDecl {
            name: "setWeather",
            params: weather_params(),
        },
        CommandDecl {
            name: "click",
            params: vec![ParamDecl::raw("button")],
        },
        CommandDecl {
            name: "longClick",
            params: vec![ParamDecl::raw("button")],
        },
        CommandDecl {
            name: "accelTap",
            params: vec![ParamDecl::raw("axis"), ParamDecl::raw("direction")],
        },
        CommandDecl {
            name: "vibe",
            params: vec![ParamDecl::raw("type")],
        },
        CommandDecl {
            name: "accelData",
            params: vec![
                ParamDecl::raw("transactionId"),
                ParamDecl::raw("numSamples"),
                ParamDecl::raw("accelData"),
            ],
        },
        CommandDecl {
            name: "getAccelData",
            params: vec![ParamDecl::raw("transactionId")],
        },
        CommandDecl {
            name: "configAccelData",
            params: vec![
                ParamDecl::raw("rate"),
                ParamDecl::raw("samples"),
                ParamDecl::raw("subscribe"),
            ],
        },
        CommandDecl {
            name: "configButtons",
            params: vec![
                ParamDecl::raw("back"),
                ParamDecl::raw("up"),
                ParamDecl::raw("select"),
                ParamDecl::raw("down"),
            ],
        },
        CommandDecl {
            name: "setMenu",
            params: menu_params(),
        },
        CommandDecl {
            name: "setMenuSection",
            params: vec![
                ParamDecl::typed("clear", Coercion::Bool),
                ParamDecl::raw("section"),
                ParamDecl::raw("items"),
                ParamDecl::typed("title", Coercion::Text),
            ],
        },
        CommandDecl {
            name: "getMenuSection",
            params: vec![ParamDecl::raw("section")],
        },
        CommandDecl {
            name: "setMenuItem",
            params: vec![
                ParamDecl::raw("section"),
                ParamDecl::raw("item"),
                ParamDecl::typed("title", Coercion::Text),
                ParamDecl::typed("subtitle", Coercion::Text),
                ParamDecl::typed("icon", Coercion::MediaId),
            ],
        },
        CommandDecl {
            name: "getMenuItem",
            params: vec![ParamDecl::raw("section"), ParamDecl::raw("item")],
        },
        CommandDecl {
            name: "menuSelect",
            params: vec![ParamDecl::raw("section"), ParamDecl::raw("item")],
        },
        CommandDecl {
            name: "menuLongSelect",
            params: vec![ParamDecl::raw("section"), ParamDecl::raw("item")],
        },
        CommandDecl {
            name: "image",
            params: vec![
                ParamDecl::raw("id"),
                ParamDecl::raw("width"),
                ParamDecl::raw("height"),
                ParamDecl::raw("pixels"),
            ],
        },
        CommandDecl {
            name: "setStage",
            params: window_params(),
        },
        CommandDecl {
            name: "stageElement",
            params: vec![
                ParamDecl::raw("id"),
                ParamDecl::raw("type"),
                ParamDecl::raw("index"),
                ParamDecl::raw("x"),
                ParamDecl::raw("y"),
                ParamDecl::raw("width"),
                ParamDecl::raw("height"),
                ParamDecl::typed("backgroundColor", Coercion::Color),
                ParamDecl::typed("borderColor", Coercion::Color),
                ParamDecl::raw("radius"),
                ParamDecl::typed("text", Coercion::Text),
                ParamDecl::typed("font", Coercion::MediaId),
                ParamDecl::typed("color", Coercion::Color),
                ParamDecl::typed("textOverflow", Coercion::TextOverflow),
                ParamDecl::typed("textAlign", Coercion::TextAlign),
                ParamDecl::typed("updateTimeUnits", Coercion::TimeUnits),
                ParamDecl::typed("image", Coercion::MediaId),
                ParamDecl::typed("compositing", Coercion::Compositing),
            ],
        },
        CommandDecl {
            name: "stageRemove",
            params: vec![ParamDecl::raw("id")],
        },
        CommandDecl {
            name: "stageAnimate",
            params: vec![
                ParamDecl::raw("id"),
                ParamDecl::raw("x"),
                ParamDecl::raw("y"),
                ParamDecl::raw("width"),
                ParamDecl::raw("height"),
                ParamDecl::raw("duration"),
                ParamDecl::typed("easing", Coercion::AnimationCurve),
            ],
        },
        CommandDecl {
            name: "stageAnimateDone",
            params: vec![ParamDecl::raw("index")],
        },
    ])
}

// ── Tests ─────────────────────────────────────────────────────────────────────
