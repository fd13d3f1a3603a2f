//! Sound dispatcher task
//!
//! Consumes sound signals and plays the card-flip clip, at most once per
//! minimum interval. Triggers inside the interval are dropped, not queued.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{with_timeout, Duration, Instant};
use heapless::Vec;

use gridboard_core::config::GridConfig;
use gridboard_core::sound::{supersede, Action, DispatcherState, SoundSignal, SOUND_QUEUE_DEPTH};
use gridboard_core::traits::AudioOutput;

use crate::channels::SoundQueue;

/// Signals handled per wakeup: a full queue plus the one that woke us
const BATCH_LEN: usize = SOUND_QUEUE_DEPTH + 1;

/// Consumer end of the sound queue
pub struct SoundDispatcher<'a, M: RawMutex, A: AudioOutput> {
    queue: &'a SoundQueue<M>,
    audio: A,
    /// PCM clip played per accepted trigger
    clip: &'a [u8],
    state: DispatcherState,
    write_timeout_ms: u32,
}

impl<'a, M: RawMutex, A: AudioOutput> SoundDispatcher<'a, M, A> {
    /// Create a dispatcher playing `clip` through `audio`
    pub fn new(queue: &'a SoundQueue<M>, audio: A, clip: &'a [u8], config: &GridConfig) -> Self {
        Self {
            queue,
            audio,
            clip,
            state: DispatcherState::new(config.sfx_min_interval_ms),
            write_timeout_ms: config.sfx_write_timeout_ms,
        }
    }

    /// Dispatcher state
    pub fn state(&self) -> &DispatcherState {
        &self.state
    }

    /// Wait for signals and handle everything queued at that point
    pub async fn step(&mut self) {
        let mut batch: Vec<SoundSignal, BATCH_LEN> = Vec::new();
        let first = self.queue.receive().await;
        let _ = batch.push(first);

        while !batch.is_full() {
            match self.queue.try_receive() {
                Some(signal) => {
                    let _ = batch.push(signal);
                }
                None => break,
            }
        }

        for &signal in supersede(&batch) {
            self.handle(signal).await;
        }
    }

    /// Run forever
    pub async fn run(&mut self) -> ! {
        loop {
            self.step().await;
        }
    }

    async fn handle(&mut self, signal: SoundSignal) {
        let now_ms = Instant::now().as_millis();

        match self.state.handle(signal, now_ms) {
            Action::Play => self.play().await,
            Action::Drop => {
                let since_ms = self
                    .state
                    .last_play_ms()
                    .map_or(0, |last| now_ms.saturating_sub(last));
                trace!(
                    "Trigger {} ms after last clip (min {} ms), dropped",
                    since_ms,
                    self.state.min_interval_ms()
                );
            }
            Action::Rest => trace!("Sound idle"),
        }
    }

    async fn play(&mut self) {
        let timeout = Duration::from_millis(u64::from(self.write_timeout_ms));

        match with_timeout(timeout, self.audio.write(self.clip, self.write_timeout_ms)).await {
            Ok(Ok(written)) => trace!("Clip played ({} bytes)", written),
            Ok(Err(e)) => {
                warn!("Clip playback failed: {:?}", e);
                self.state.record_failure();
            }
            Err(_) => {
                warn!("Clip playback timed out after {} ms", self.write_timeout_ms);
                self.state.record_failure();
            }
        }
    }
}

/// Sound task - owns the dispatcher state for the lifetime of the firmware
pub async fn sound_task<M: RawMutex, A: AudioOutput>(
    queue: &SoundQueue<M>,
    audio: A,
    clip: &[u8],
    config: &GridConfig,
) -> ! {
    info!("Sound task started");

    let mut dispatcher = SoundDispatcher::new(queue, audio, clip, config);
    dispatcher.run().await
}
