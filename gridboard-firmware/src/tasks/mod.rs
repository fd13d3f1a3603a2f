//! Embassy async tasks
//!
//! Each task runs independently and communicates through the coordinator.
//! The functions here are generic; board binaries wrap them in
//! `#[embassy_executor::task]` functions with concrete engine, audio and
//! mutex types.

pub mod render;
pub mod sound;
pub mod startup;

pub use render::render_task;
pub use sound::{sound_task, SoundDispatcher};
pub use startup::startup_task;
