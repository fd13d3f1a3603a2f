//! Text commands received over the control channel
//!
//! Inbound transport payloads are wrapped in a [`ControlMessage`] and
//! decoded into a [`TextCommand`] for the animation coordinator.

pub mod message;

pub use message::{ControlMessage, DecodeError, TextCommand, MAX_TEXT_LEN};
