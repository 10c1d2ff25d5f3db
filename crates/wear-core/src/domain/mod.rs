//! Domain entities for the emulated device.
//!
//! Pure state and rules with no runtime, OS, or rendering dependencies: the
//! navigation stack with its single-active-window invariant, the menu
//! selection model, and the button press contract. The emulator crate
//! mutates these through a single writer and reflects the results to its
//! renderer.

pub mod display;
pub mod input;
