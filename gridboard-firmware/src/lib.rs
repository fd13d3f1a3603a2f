//! Grid Board - coordination firmware
//!
//! Embassy task layer for the Grid Board message display. Three activities
//! run concurrently on the board:
//!
//! - The BLE control channel delivers text commands
//! - The animation engine flips cards on the shared display
//! - The sound task clicks along with every flip
//!
//! A [`Coordinator`] owns everything they share: the rendering lock, the
//! session active flag, the pending text slot and the sound signal queue.
//! Board binaries construct one, place it in a `StaticCell`, and spawn the
//! tasks in [`tasks`] against it.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod channels;
pub mod control;
pub mod coordinator;
pub mod tasks;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod mock;

pub use channels::SoundQueue;
pub use control::ControlAdapter;
pub use coordinator::Coordinator;
