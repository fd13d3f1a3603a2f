//! Sound feedback signalling
//!
//! Signals flow from the active animation session to a single sound
//! dispatcher, which rate-limits them into clip playback requests.

pub mod dispatcher;
pub mod signal;

pub use dispatcher::{Action, DispatcherState, DispatcherStats, Mode, DEFAULT_MIN_INTERVAL_MS};
pub use signal::{supersede, SoundSignal, SOUND_QUEUE_DEPTH};
