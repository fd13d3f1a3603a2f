//! Sound signal queue
//!
//! Bounded channel carrying sound signals from the active animation session
//! to the sound dispatcher task. Uses embassy-sync primitives so producer and
//! consumer may live on different executors.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;

use gridboard_core::sound::{SoundSignal, SOUND_QUEUE_DEPTH};
use gridboard_core::traits::SoundSink;

/// Queue between animation sessions and the sound dispatcher
///
/// Producers never wait: a trigger that does not fit is dropped, and a stop
/// flushes everything still queued before enqueuing `Idle`.
pub struct SoundQueue<M: RawMutex> {
    channel: Channel<M, SoundSignal, SOUND_QUEUE_DEPTH>,
}

impl<M: RawMutex> Default for SoundQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> SoundQueue<M> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Wait for the next signal
    pub async fn receive(&self) -> SoundSignal {
        self.channel.receive().await
    }

    /// Take the next signal if one is queued
    pub fn try_receive(&self) -> Option<SoundSignal> {
        self.channel.try_receive().ok()
    }

    /// Number of queued signals
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.channel.len()
    }

    /// Check if nothing is queued
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Raw channel, for enqueuing without the producer-side flush
    #[cfg(test)]
    pub(crate) fn channel_for_test(&self) -> &Channel<M, SoundSignal, SOUND_QUEUE_DEPTH> {
        &self.channel
    }
}

impl<M: RawMutex> SoundSink for SoundQueue<M> {
    fn emit(&self, signal: SoundSignal) {
        match signal {
            SoundSignal::Trigger => {
                if self.channel.try_send(SoundSignal::Trigger).is_err() {
                    trace!("Sound queue full, dropping trigger");
                }
            }
            SoundSignal::Idle => {
                // Anything still queued is stale once the animation stops
                self.channel.clear();
                if self.channel.try_send(SoundSignal::Idle).is_err() {
                    warn!("Sound queue refilled during flush, idle lost");
                }
            }
        }
    }
}
