//! Device buttons and press classification.
//!
//! The wire encodes buttons as fixed ordinals; the hold-duration threshold
//! that splits a `click` from a `longClick` is part of the protocol contract
//! (the host's handlers are registered against one or the other).

use std::time::Duration;

/// Hold duration at or above which a press/release pair is a long click.
pub const LONG_CLICK_THRESHOLD: Duration = Duration::from_millis(750);

/// The four physical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Back,
    Up,
    Select,
    Down,
}

impl Button {
    /// Fixed wire ordinal: back = 0, up = 1, select = 2, down = 3.
    pub fn ordinal(self) -> i64 {
        match self {
            Button::Back => 0,
            Button::Up => 1,
            Button::Select => 2,
            Button::Down => 3,
        }
    }

    /// Button name as the host application spells it.
    pub fn name(self) -> &'static str {
        match self {
            Button::Back => "back",
            Button::Up => "up",
            Button::Select => "select",
            Button::Down => "down",
        }
    }

    /// Parses a host-side button name. Matching is case-insensitive; hosts
    /// are inconsistent about capitalization.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "back" => Some(Button::Back),
            "up" => Some(Button::Up),
            "select" => Some(Button::Select),
            "down" => Some(Button::Down),
            _ => None,
        }
    }
}

/// Outcome of a press/release pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Click,
    LongClick,
}

impl ClickKind {
    /// Classifies a hold duration: ≥ 750 ms is a long click.
    pub fn classify(held: Duration) -> Self {
        if held >= LONG_CLICK_THRESHOLD {
            ClickKind::LongClick
        } else {
            ClickKind::Click
        }
    }

    /// The command this click kind dispatches as.
    pub fn command_name(self) -> &'static str {
        match self {
            ClickKind::Click => "click",
            ClickKind::LongClick => "longClick",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
