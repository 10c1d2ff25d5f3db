//! # wear-core
//!
//! Shared library for the wearable emulator: the command schema registry,
//! the positional payload codec, transaction identifiers, and the display
//! domain (navigation stack, cards, menus, stages).
//!
//! This crate is used by the emulator runtime and by host-side test
//! harnesses. It has zero dependencies on the async runtime, OS APIs, or
//! any rendering machinery – everything here can be exercised with plain
//! unit tests.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `wear_core::DisplayStack` instead of the full path.
pub use domain::display::{
    DisplayObject, DisplayStack, ElementFields, ElementKind, Menu, MenuItem, MenuSection,
    ObjectId, Stage, StageElement, WindowAttrs, WindowBody, WindowKind, ROOT_WINDOW_ID,
};
pub use domain::input::{Button, ClickKind, LONG_CLICK_THRESHOLD};
pub use protocol::codec::{decode_payload, encode_command, CodecError, DecodedCommand, Params};
pub use protocol::commands::builtin_commands;
pub use protocol::registry::CommandRegistry;
pub use protocol::transaction::{Transaction, TransactionId};
pub use protocol::value::Value;
