//! Animation engine trait
//!
//! The engine turns text into card-flip animations on the shared display
//! surface. Glyph decomposition, layout and frame timing all live behind
//! this trait; the coordination layer only decides when it may run.

use super::sound::SoundSink;

/// Trait for the external animation engine
///
/// Implementations are only ever invoked while the caller holds the
/// rendering lock, so they may mutate the display surface freely.
#[allow(async_fn_in_trait)]
pub trait AnimationEngine {
    /// Display surface the engine draws on
    type Surface;

    /// Bind the engine to its display surface
    fn initialize(&mut self, surface: Self::Surface);

    /// Render `text` and animate it onto the grid
    ///
    /// Flip start/stop notifications go to `sound`. The engine may return
    /// before its animation has fully settled, in which case
    /// [`is_animation_running`](Self::is_animation_running) must keep
    /// reporting `true` until it has.
    async fn process_text_and_animate<S: SoundSink>(&mut self, text: &str, sound: &S);

    /// Check if an animation is still in progress
    fn is_animation_running(&self) -> bool;
}
