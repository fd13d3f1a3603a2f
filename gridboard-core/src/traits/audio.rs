//! Audio output trait

/// Errors that can occur when playing a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioError {
    /// Write did not complete within its timeout
    Timeout,
    /// Driver rejected the write
    Write,
}

/// Trait for the audio subsystem
///
/// Abstracts the codec/I2S driver. Bring-up (codec init, volume, amplifier
/// enable) happens before the driver is handed to the sound dispatcher.
#[allow(async_fn_in_trait)]
pub trait AudioOutput {
    /// Write a PCM buffer, waiting at most `timeout_ms`
    ///
    /// Returns the number of bytes accepted by the driver.
    async fn write(&mut self, pcm: &[u8], timeout_ms: u32) -> Result<usize, AudioError>;
}
