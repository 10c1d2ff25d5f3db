//! Application layer of the emulator.
//!
//! Use cases orchestrating the display domain against injected ports:
//!
//! - **`dispatch`** – the protocol interpreter. Runs on every decoded
//!   command; this is where the UI state machine lives.
//! - **`screen`** – single writer over the display stack, owner of all
//!   timer task handles.
//! - **`buttons`** – press/release pairing and navigation interception.
//! - **`emulator`** – the explicit context value and the event loop.
//! - **`host_api`** – the facade the host application programs against.
//!
//! Nothing in this layer touches the file system or parses configuration;
//! those concerns live in `infrastructure`.

pub mod buttons;
pub mod dispatch;
pub mod emulator;
pub mod host_api;
pub mod screen;
