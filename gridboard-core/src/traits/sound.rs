//! Sound signal sink trait

use crate::sound::SoundSignal;

/// Destination for sound signals emitted during an animation session
///
/// Emitting never blocks; a sink that cannot accept a signal drops it.
pub trait SoundSink {
    /// Emit a signal
    fn emit(&self, signal: SoundSignal);

    /// A card flip started
    fn start(&self) {
        self.emit(SoundSignal::Trigger);
    }

    /// The animation went quiet
    fn stop(&self) {
        self.emit(SoundSignal::Idle);
    }
}
