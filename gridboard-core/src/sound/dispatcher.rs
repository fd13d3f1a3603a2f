//! Sound dispatcher state and rate limiter
//!
//! Decides, for each dequeued signal, whether a click is played.
//! Triggers arriving faster than the minimum interval correspond to flips
//! shorter than the clip itself, so they are dropped rather than queued.

use super::signal::SoundSignal;

/// Minimum time between two clip playbacks
pub const DEFAULT_MIN_INTERVAL_MS: u32 = 33;

/// Dispatcher activity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Following an animation session
    Active,
    /// Quiet until the next trigger
    Idle,
}

/// What the dispatcher should do with a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Issue a playback request now
    Play,
    /// Trigger arrived inside the minimum interval
    Drop,
    /// Idle received, nothing to play
    Rest,
}

/// Playback counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatcherStats {
    /// Playback requests issued
    pub played: u32,
    /// Triggers dropped by the rate limiter
    pub dropped: u32,
    /// Issued requests the audio output rejected or timed out
    pub failed: u32,
}

/// State owned by the sound dispatcher task
#[derive(Debug, Clone)]
pub struct DispatcherState {
    /// Minimum spacing between playbacks (ms)
    min_interval_ms: u32,
    /// Monotonic time of the last issued playback (ms)
    last_play_ms: Option<u64>,
    /// Current mode
    mode: Mode,
    stats: DispatcherStats,
}

impl Default for DispatcherState {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL_MS)
    }
}

impl DispatcherState {
    /// Create dispatcher state with the given minimum playback interval
    pub fn new(min_interval_ms: u32) -> Self {
        Self {
            min_interval_ms,
            last_play_ms: None,
            mode: Mode::Active,
            stats: DispatcherStats::default(),
        }
    }

    /// Apply a signal received at `now_ms`
    ///
    /// On [`Action::Play`] the playback timestamp has already been advanced
    /// to `now_ms`; the caller must issue the request.
    pub fn handle(&mut self, signal: SoundSignal, now_ms: u64) -> Action {
        match signal {
            SoundSignal::Idle => {
                self.mode = Mode::Idle;
                Action::Rest
            }
            SoundSignal::Trigger => {
                // A dropped trigger still marks the session as active
                self.mode = Mode::Active;

                if self.interval_elapsed(now_ms) {
                    self.last_play_ms = Some(now_ms);
                    self.stats.played = self.stats.played.saturating_add(1);
                    Action::Play
                } else {
                    self.stats.dropped = self.stats.dropped.saturating_add(1);
                    Action::Drop
                }
            }
        }
    }

    /// Record that an issued playback request failed
    pub fn record_failure(&mut self) {
        self.stats.failed = self.stats.failed.saturating_add(1);
    }

    fn interval_elapsed(&self, now_ms: u64) -> bool {
        match self.last_play_ms {
            Some(last) => now_ms.saturating_sub(last) >= u64::from(self.min_interval_ms),
            None => true,
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Time of the last issued playback, if any
    pub fn last_play_ms(&self) -> Option<u64> {
        self.last_play_ms
    }

    /// Configured minimum interval
    pub fn min_interval_ms(&self) -> u32 {
        self.min_interval_ms
    }

    /// Playback counters
    pub fn stats(&self) -> DispatcherStats {
        self.stats
    }
}
