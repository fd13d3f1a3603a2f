//! Sound signals produced by animation sessions

/// Capacity of the sound signal queue
pub const SOUND_QUEUE_DEPTH: usize = 8;

/// Signal from the active animation session to the sound dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SoundSignal {
    /// A card started flipping, play a click if the rate limit allows
    Trigger,
    /// Animation stopped, go quiet and discard anything queued before this
    Idle,
}

/// Collapse a batch of queued signals
///
/// Everything queued ahead of the newest `Idle` is superseded by it.
/// Returns the suffix starting at that `Idle`, or the whole batch if it
/// holds no `Idle`.
pub fn supersede(batch: &[SoundSignal]) -> &[SoundSignal] {
    match batch.iter().rposition(|s| *s == SoundSignal::Idle) {
        Some(idx) => &batch[idx..],
        None => batch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SoundSignal::{Idle, Trigger};

    #[test]
    fn test_supersede_without_idle() {
        let batch = [Trigger, Trigger, Trigger];
        assert_eq!(supersede(&batch), &batch[..]);
    }

    #[test]
    fn test_supersede_drops_triggers_before_idle() {
        let batch = [Trigger, Trigger, Idle];
        assert_eq!(supersede(&batch), &[Idle]);
    }

    #[test]
    fn test_supersede_keeps_triggers_after_newest_idle() {
        let batch = [Trigger, Idle, Trigger, Idle, Trigger];
        assert_eq!(supersede(&batch), &[Idle, Trigger]);
    }

    #[test]
    fn test_supersede_empty() {
        assert!(supersede(&[]).is_empty());
    }
}
