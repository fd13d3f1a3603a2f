//! Collaborator traits
//!
//! These traits define the interface between the coordination layer
//! and the external renderer, audio driver and sound queue.

pub mod audio;
pub mod engine;
pub mod sound;

pub use audio::{AudioError, AudioOutput};
pub use engine::AnimationEngine;
pub use sound::SoundSink;
