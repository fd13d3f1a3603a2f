//! Mock collaborators for host tests

use std::string::{String, ToString};
use std::vec::Vec;

use embassy_time::{Duration, Instant, Timer};

use gridboard_core::traits::{AnimationEngine, AudioError, AudioOutput, SoundSink};

/// Span of one engine invocation
#[derive(Debug, Clone, Copy)]
pub struct Span {
    pub start: Instant,
    pub end: Instant,
}

/// Animation engine that flips a fixed number of cards per text
pub struct MockEngine {
    /// Card flips per text
    pub flips: usize,
    /// Time per flip (ms)
    pub flip_ms: u64,
    /// Time the animation keeps running after the call returns (ms)
    pub settle_ms: u64,
    /// Surface passed to `initialize`
    pub surface: Option<u8>,
    /// Texts in the order they were animated
    pub rendered: Vec<String>,
    /// Invocation spans, in order
    pub spans: Vec<Span>,
    settle_until: Option<Instant>,
}

impl MockEngine {
    pub fn new(flips: usize, flip_ms: u64) -> Self {
        Self {
            flips,
            flip_ms,
            settle_ms: 0,
            surface: None,
            rendered: Vec::new(),
            spans: Vec::new(),
            settle_until: None,
        }
    }

    /// Engine that returns immediately and keeps animating for `settle_ms`
    pub fn detached(settle_ms: u64) -> Self {
        Self {
            settle_ms,
            ..Self::new(0, 0)
        }
    }
}

impl AnimationEngine for MockEngine {
    type Surface = u8;

    fn initialize(&mut self, surface: u8) {
        self.surface = Some(surface);
    }

    async fn process_text_and_animate<S: SoundSink>(&mut self, text: &str, sound: &S) {
        let start = Instant::now();
        self.rendered.push(text.to_string());

        for _ in 0..self.flips {
            sound.start();
            Timer::after_millis(self.flip_ms).await;
        }
        if self.flips > 0 {
            sound.stop();
        }

        if self.settle_ms > 0 {
            self.settle_until = Some(Instant::now() + Duration::from_millis(self.settle_ms));
        }

        self.spans.push(Span {
            start,
            end: Instant::now(),
        });
    }

    fn is_animation_running(&self) -> bool {
        self.settle_until
            .map(|until| Instant::now() < until)
            .unwrap_or(false)
    }
}

/// Audio output that counts writes
#[derive(Default)]
pub struct MockAudio {
    /// Successful writes
    pub writes: usize,
    /// Delay before each write completes (ms)
    pub delay_ms: u64,
    /// Reject every write
    pub fail: bool,
}

impl AudioOutput for MockAudio {
    async fn write(&mut self, pcm: &[u8], _timeout_ms: u32) -> Result<usize, AudioError> {
        if self.delay_ms > 0 {
            Timer::after_millis(self.delay_ms).await;
        }
        if self.fail {
            return Err(AudioError::Write);
        }
        self.writes += 1;
        Ok(pcm.len())
    }
}
