//! Configuration type definitions
//!
//! Timing and identity settings for the coordination layer. Configuration
//! can be written as TOML or stored in flash as postcard-serialized data.

use heapless::String;

use crate::command::MAX_TEXT_LEN;
use crate::sound::DEFAULT_MIN_INTERVAL_MS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum device name length
pub const MAX_NAME_LEN: usize = 32;

/// Device name used for logging and advertising
pub const DEVICE_NAME: &str = "Grid_Board";

/// Text animated once after startup
pub const WELCOME_TEXT: &str = "              WELCOME\u{1F600}       TO     \u{1F4CC}GRID BOARD\u{2764}            ";

/// Delay before the welcome animation (ms)
pub const DEFAULT_STARTUP_DELAY_MS: u32 = 5000;

/// Interval between idle checks while waiting for a session to end (ms)
pub const DEFAULT_IDLE_POLL_MS: u32 = 100;

/// Timeout for one clip playback request (ms)
pub const DEFAULT_SFX_WRITE_TIMEOUT_MS: u32 = 200;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML text could not be parsed
    Toml,
    /// Binary data could not be decoded
    Postcard,
    /// Output buffer too small for serialized config
    BufferTooSmall,
    /// A value is out of range
    InvalidValue,
}

/// Coordination layer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Device name
    pub device_name: String<MAX_NAME_LEN>,
    /// Text animated after startup (empty skips the welcome animation)
    pub welcome_text: String<MAX_TEXT_LEN>,
    /// Delay before the welcome animation (ms)
    pub startup_delay_ms: u32,
    /// Poll interval while waiting for an animation to finish (ms)
    pub idle_poll_ms: u32,
    /// Minimum spacing between sound clips (ms)
    pub sfx_min_interval_ms: u32,
    /// Timeout for one clip playback request (ms)
    pub sfx_write_timeout_ms: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            device_name: truncated(DEVICE_NAME),
            welcome_text: truncated(WELCOME_TEXT),
            startup_delay_ms: DEFAULT_STARTUP_DELAY_MS,
            idle_poll_ms: DEFAULT_IDLE_POLL_MS,
            sfx_min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            sfx_write_timeout_ms: DEFAULT_SFX_WRITE_TIMEOUT_MS,
        }
    }
}

impl GridConfig {
    /// Check that timing values are usable
    ///
    /// A zero poll interval would spin the waiting context, and a zero
    /// write timeout could never complete a playback.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.idle_poll_ms == 0 || self.sfx_write_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue);
        }
        Ok(())
    }

    /// Parse configuration from TOML
    ///
    /// Missing keys keep their defaults.
    #[cfg(feature = "toml")]
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|_| ConfigError::Toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Decode configuration persisted in postcard format
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Postcard)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration into `buf`, returning the used length
    #[cfg(feature = "serde")]
    pub fn to_slice(&self, buf: &mut [u8]) -> Result<usize, ConfigError> {
        postcard::to_slice(self, buf)
            .map(|used| used.len())
            .map_err(|e| match e {
                postcard::Error::SerializeBufferFull => ConfigError::BufferTooSmall,
                _ => ConfigError::Postcard,
            })
    }
}

/// Copy `s` into a bounded string, cutting at a char boundary if needed
fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut end = s.len().min(N);
    while !s.is_char_boundary(end) {
        end -= 1;
    }

    let mut out = String::new();
    // Cannot fail: `end <= N`
    let _ = out.push_str(&s[..end]);
    out
}
