//! Render task
//!
//! Runs posted text on the display context, so control channel callbacks
//! never wait for an animation to finish.

use embassy_sync::blocking_mutex::raw::RawMutex;

use gridboard_core::traits::AnimationEngine;

use crate::coordinator::Coordinator;

/// Render task - animates the newest posted text, one session at a time
pub async fn render_task<M: RawMutex, E: AnimationEngine>(coordinator: &Coordinator<M, E>) -> ! {
    info!("Render task started");

    loop {
        coordinator.wait_for_work().await;
        coordinator.run_pending().await;
    }
}
