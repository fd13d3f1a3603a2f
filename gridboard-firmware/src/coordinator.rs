//! Animation coordinator
//!
//! Owns everything shared between the control channel, the render context
//! and the sound task:
//!
//! - The rendering lock, which owns the animation engine and its surface
//! - The session active flag, readable without the lock
//! - The pending text slot (last write wins, no queue)
//! - The sound signal queue the engine reports flips into
//!
//! At most one animation session runs at a time. A session is started only
//! while holding the rendering lock, and the lock is held until the engine
//! reports that its animation has settled.

use core::cell::RefCell;

use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use portable_atomic::{AtomicBool, Ordering};

use gridboard_core::command::TextCommand;
use gridboard_core::config::{ConfigError, GridConfig};
use gridboard_core::traits::AnimationEngine;

use crate::channels::SoundQueue;

/// Coordination context for one display
pub struct Coordinator<M: RawMutex, E: AnimationEngine> {
    /// Rendering lock
    engine: Mutex<M, E>,
    /// Set while an animation session is in progress
    active: AtomicBool,
    /// Newest text not yet started
    pending: BlockingMutex<M, RefCell<Option<TextCommand>>>,
    /// Raised when text is posted for the render task
    work: Signal<M, ()>,
    /// Raised when a session ends
    session_done: Signal<M, ()>,
    sound: SoundQueue<M>,
    idle_poll: Duration,
}

impl<M: RawMutex, E: AnimationEngine> Coordinator<M, E> {
    /// Create a coordinator around an animation engine
    ///
    /// Fails if `config` does not pass [`GridConfig::validate`].
    pub fn new(engine: E, config: &GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            engine: Mutex::new(engine),
            active: AtomicBool::new(false),
            pending: BlockingMutex::new(RefCell::new(None)),
            work: Signal::new(),
            session_done: Signal::new(),
            sound: SoundQueue::new(),
            idle_poll: Duration::from_millis(u64::from(config.idle_poll_ms)),
        })
    }

    /// Bind the engine to its display surface
    ///
    /// Runs under the rendering lock so it cannot interleave with a session.
    pub async fn initialize(&self, surface: E::Surface) {
        let mut engine = self.engine.lock().await;
        engine.initialize(surface);
        debug!("Animation engine initialized");
    }

    /// Queue that receives the engine's flip notifications
    pub fn sound_queue(&self) -> &SoundQueue<M> {
        &self.sound
    }

    /// Check if an animation session is in progress
    pub fn is_animation_running(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Check if text is waiting to be animated
    #[cfg(test)]
    pub(crate) fn has_pending(&self) -> bool {
        self.pending.lock(|slot| slot.borrow().is_some())
    }

    /// Hand text to the render task without waiting
    ///
    /// Replaces any text that has not started animating yet.
    pub fn post(&self, command: TextCommand) {
        self.store_pending(command);
        self.work.signal(());
    }

    /// Animate `text`, waiting for any running session to finish first
    ///
    /// Returns once the text has been animated, or once a newer submission
    /// has superseded it. Empty or oversized text is skipped.
    pub async fn submit(&self, text: &str) {
        if text.is_empty() {
            info!("Text is empty, skipping animation");
            return;
        }

        match TextCommand::new(text) {
            Ok(command) => self.submit_command(command).await,
            Err(e) => warn!("Skipping text: {:?}", e),
        }
    }

    /// Animate an already decoded command
    pub async fn submit_command(&self, command: TextCommand) {
        self.store_pending(command);
        self.run_pending().await;
    }

    /// Wait until text has been posted
    pub async fn wait_for_work(&self) {
        self.work.wait().await;
    }

    /// Run one session for the newest pending text
    ///
    /// Returns false if there was nothing left to animate, which happens when
    /// another caller already took the text this one was waiting for.
    pub async fn run_pending(&self) -> bool {
        self.wait_idle().await;

        let mut engine = self.engine.lock().await;

        // Taken under the lock, so whoever runs next always sees the newest text
        let Some(command) = self.take_pending() else {
            debug!("Pending text superseded, nothing to animate");
            return false;
        };

        let session = Session::begin(&self.active, &self.session_done);
        info!("Animating '{}' ({} bytes)", command.as_str(), command.len());

        engine
            .process_text_and_animate(command.as_str(), &self.sound)
            .await;

        // The engine may return while its animation is still settling
        while engine.is_animation_running() {
            Timer::after(self.idle_poll).await;
        }

        drop(session);
        debug!("Animation session finished");
        true
    }

    /// Wait until no session is active
    ///
    /// Each wait is bounded by the poll interval, so a missed completion
    /// notification only delays the next check.
    async fn wait_idle(&self) {
        while self.is_animation_running() {
            select(self.session_done.wait(), Timer::after(self.idle_poll)).await;
        }
    }

    fn store_pending(&self, command: TextCommand) {
        let replaced = self
            .pending
            .lock(|slot| slot.borrow_mut().replace(command).is_some());
        if replaced {
            debug!("Pending text replaced by newer submission");
        }
    }

    fn take_pending(&self) -> Option<TextCommand> {
        self.pending.lock(|slot| slot.borrow_mut().take())
    }

    /// Consume the coordinator and return the engine
    #[cfg(test)]
    pub(crate) fn into_engine(self) -> E {
        self.engine.into_inner()
    }
}

/// Active animation session
///
/// Clears the active flag and announces completion when dropped, on every
/// exit path.
struct Session<'a, M: RawMutex> {
    active: &'a AtomicBool,
    done: &'a Signal<M, ()>,
}

impl<'a, M: RawMutex> Session<'a, M> {
    fn begin(active: &'a AtomicBool, done: &'a Signal<M, ()>) -> Self {
        active.store(true, Ordering::Release);
        Self { active, done }
    }
}

impl<M: RawMutex> Drop for Session<'_, M> {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
        self.done.signal(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    use embassy_futures::block_on;
    use embassy_futures::join::{join, join3};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_time::Instant;

    use gridboard_core::sound::SoundSignal;

    use crate::mock::MockEngine;

    type TestCoordinator = Coordinator<CriticalSectionRawMutex, MockEngine>;

    fn fast_config() -> GridConfig {
        GridConfig {
            idle_poll_ms: 10,
            ..GridConfig::default()
        }
    }

    #[test]
    fn test_submit_while_idle() {
        let coordinator = TestCoordinator::new(MockEngine::new(3, 10), &fast_config()).unwrap();
        let observed = Cell::new(false);

        assert!(!coordinator.is_animation_running());
        block_on(join(coordinator.submit("HELLO"), async {
            Timer::after_millis(5).await;
            observed.set(coordinator.is_animation_running());
        }));

        assert!(observed.get());
        assert!(!coordinator.is_animation_running());
        assert!(!coordinator.has_pending());

        let engine = coordinator.into_engine();
        assert_eq!(engine.rendered, ["HELLO"]);
    }

    #[test]
    fn test_empty_text_skipped() {
        let coordinator = TestCoordinator::new(MockEngine::new(1, 10), &fast_config()).unwrap();
        block_on(coordinator.submit(""));

        assert!(!coordinator.has_pending());
        assert!(coordinator.into_engine().rendered.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let coordinator = TestCoordinator::new(MockEngine::new(10, 10), &fast_config()).unwrap();

        block_on(join3(
            coordinator.submit("X"),
            async {
                Timer::after_millis(10).await;
                coordinator.submit("A").await;
            },
            async {
                Timer::after_millis(20).await;
                coordinator.submit("B").await;
            },
        ));

        let engine = coordinator.into_engine();
        assert_eq!(engine.rendered, ["X", "B"]);
    }

    #[test]
    fn test_sessions_never_overlap() {
        let coordinator = TestCoordinator::new(MockEngine::new(3, 10), &fast_config()).unwrap();

        block_on(join3(
            coordinator.submit("ONE"),
            async {
                Timer::after_millis(5).await;
                coordinator.submit("TWO").await;
            },
            async {
                // Submit only once TWO has been taken, so both run
                Timer::after_millis(10).await;
                while coordinator.has_pending() {
                    Timer::after_millis(1).await;
                }
                coordinator.submit("THREE").await;
            },
        ));

        let engine = coordinator.into_engine();
        assert_eq!(engine.rendered, ["ONE", "TWO", "THREE"]);
        for pair in engine.spans.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_session_held_while_engine_settles() {
        let coordinator = TestCoordinator::new(MockEngine::detached(50), &fast_config()).unwrap();
        let observed = Cell::new(false);
        let start = Instant::now();

        block_on(join(coordinator.submit("HI"), async {
            Timer::after_millis(20).await;
            observed.set(coordinator.is_animation_running());
        }));

        assert!(observed.get());
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert!(!coordinator.is_animation_running());
    }

    #[test]
    fn test_engine_flips_reach_sound_queue() {
        let coordinator = TestCoordinator::new(MockEngine::new(2, 5), &fast_config()).unwrap();
        block_on(coordinator.submit("AB"));

        // Stop flushed the queued triggers
        let queue = coordinator.sound_queue();
        assert_eq!(queue.try_receive(), Some(SoundSignal::Idle));
        assert_eq!(queue.try_receive(), None);
    }

    #[test]
    fn test_initialize_binds_surface() {
        let coordinator = TestCoordinator::new(MockEngine::new(0, 0), &fast_config()).unwrap();
        block_on(coordinator.initialize(7));
        assert_eq!(coordinator.into_engine().surface, Some(7));
    }

    #[test]
    fn test_cancelled_session_releases_lock() {
        let coordinator = TestCoordinator::new(MockEngine::new(10, 10), &fast_config()).unwrap();

        // Dropped partway through the first flip sequence
        block_on(select(coordinator.submit("A"), Timer::after_millis(15)));
        assert!(!coordinator.is_animation_running());

        block_on(coordinator.submit("B"));
        assert!(!coordinator.is_animation_running());

        let engine = coordinator.into_engine();
        assert_eq!(engine.rendered, ["A", "B"]);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GridConfig {
            idle_poll_ms: 0,
            ..GridConfig::default()
        };
        let result = TestCoordinator::new(MockEngine::new(1, 5), &config);
        assert!(matches!(result, Err(ConfigError::InvalidValue)));
    }

    #[test]
    fn test_post_is_consumed_by_runner() {
        let coordinator = TestCoordinator::new(MockEngine::new(1, 5), &fast_config()).unwrap();

        block_on(select(
            async {
                loop {
                    coordinator.wait_for_work().await;
                    coordinator.run_pending().await;
                }
            },
            async {
                coordinator.post(TextCommand::new("A").unwrap());
                coordinator.post(TextCommand::new("B").unwrap());
                Timer::after_millis(50).await;
            },
        ));

        let engine = coordinator.into_engine();
        assert_eq!(engine.rendered, ["B"]);
    }
}
