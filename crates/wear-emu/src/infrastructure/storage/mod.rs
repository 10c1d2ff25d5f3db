//! File-system persistence for emulator settings.

pub mod config;
