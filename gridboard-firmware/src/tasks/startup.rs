//! Startup task
//!
//! Animates the welcome text once the display and engine have had time
//! to settle after boot.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Timer;

use gridboard_core::config::GridConfig;
use gridboard_core::traits::AnimationEngine;

use crate::coordinator::Coordinator;

/// Startup task - one-shot welcome animation
pub async fn startup_task<M: RawMutex, E: AnimationEngine>(
    coordinator: &Coordinator<M, E>,
    config: &GridConfig,
) {
    if config.welcome_text.is_empty() {
        info!("{}: welcome text is empty, skipping animation", config.device_name.as_str());
        return;
    }

    Timer::after_millis(u64::from(config.startup_delay_ms)).await;

    info!("{}: playing welcome animation", config.device_name.as_str());
    coordinator.submit(config.welcome_text.as_str()).await;
}
