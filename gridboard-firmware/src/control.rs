//! Control channel adapter
//!
//! Callback surface registered with the BLE server. Inbound payloads are
//! decoded into text commands and handed to the render task; the callback
//! itself never waits for an animation.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Instant;
use portable_atomic::{AtomicBool, Ordering};

use gridboard_core::command::{ControlMessage, DecodeError};
use gridboard_core::traits::AnimationEngine;

use crate::coordinator::Coordinator;

/// Adapter between the control channel transport and the coordinator
pub struct ControlAdapter<'a, M: RawMutex, E: AnimationEngine> {
    coordinator: &'a Coordinator<M, E>,
    device_name: &'a str,
    connected: AtomicBool,
}

impl<'a, M: RawMutex, E: AnimationEngine> ControlAdapter<'a, M, E> {
    /// Create an adapter feeding `coordinator`
    pub fn new(coordinator: &'a Coordinator<M, E>, device_name: &'a str) -> Self {
        Self {
            coordinator,
            device_name,
            connected: AtomicBool::new(false),
        }
    }

    /// Connection state change from the transport
    pub fn on_connect(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
        info!(
            "{}: BLE {}",
            self.device_name,
            if connected { "connected" } else { "disconnected" }
        );
    }

    /// Payload received from the transport
    ///
    /// Valid text replaces whatever is still waiting to be animated.
    /// Empty or malformed payloads are logged and skipped.
    pub fn on_data(&self, data: &[u8]) {
        let message = ControlMessage::new(data, Instant::now().as_millis());

        match message.decode() {
            Ok(command) => {
                info!(
                    "{}: received text '{}' (length: {})",
                    self.device_name,
                    command.as_str(),
                    message.len()
                );
                self.coordinator.post(command);
            }
            Err(DecodeError::Empty) => {
                info!("{}: received empty text, skipping", self.device_name);
            }
            Err(e) => {
                warn!("{}: dropping malformed text: {:?}", self.device_name, e);
            }
        }
    }

    /// Last reported connection state
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}
