//! Board-agnostic core logic for the Grid Board firmware
//!
//! This crate contains the coordination logic that does not depend on
//! an async runtime or specific hardware:
//!
//! - Control message decoding into text commands
//! - Sound signals and the sound dispatcher's rate limiter
//! - Configuration type definitions
//! - Collaborator traits (animation engine, audio output, sound sink)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod command;
pub mod config;
pub mod sound;
pub mod traits;
