//! Control message decoding
//!
//! The control channel delivers raw byte payloads. Each payload is decoded
//! exactly once into a [`TextCommand`] and then discarded.

use heapless::String;

/// Maximum text command length in bytes
///
/// Matches the largest BLE attribute value. A full 12x5 grid of emoji
/// with variation selectors (up to 7 bytes per cell) fits.
pub const MAX_TEXT_LEN: usize = 512;

/// Reasons a payload cannot become a text command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Payload carried no bytes
    Empty,
    /// Payload is not valid UTF-8
    InvalidUtf8 {
        /// Length of the longest valid prefix
        valid_up_to: usize,
    },
    /// Payload exceeds [`MAX_TEXT_LEN`]
    TooLong {
        /// Payload length in bytes
        len: usize,
    },
}

/// A raw inbound payload from the control channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlMessage<'a> {
    /// Bytes as delivered by the transport
    pub payload: &'a [u8],
    /// Monotonic arrival time in milliseconds
    pub received_at_ms: u64,
}

impl<'a> ControlMessage<'a> {
    /// Wrap a transport payload
    pub const fn new(payload: &'a [u8], received_at_ms: u64) -> Self {
        Self {
            payload,
            received_at_ms,
        }
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Decode the payload into a text command
    pub fn decode(&self) -> Result<TextCommand, DecodeError> {
        if self.payload.is_empty() {
            return Err(DecodeError::Empty);
        }
        if self.payload.len() > MAX_TEXT_LEN {
            return Err(DecodeError::TooLong {
                len: self.payload.len(),
            });
        }

        let text = core::str::from_utf8(self.payload).map_err(|e| DecodeError::InvalidUtf8 {
            valid_up_to: e.valid_up_to(),
        })?;

        TextCommand::new(text)
    }
}

/// Text destined for the animation engine
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextCommand {
    text: String<MAX_TEXT_LEN>,
}

impl TextCommand {
    /// Create a command from text
    ///
    /// Empty text is rejected, since it would produce no animation.
    pub fn new(text: &str) -> Result<Self, DecodeError> {
        if text.is_empty() {
            return Err(DecodeError::Empty);
        }

        let mut buf = String::new();
        buf.push_str(text)
            .map_err(|_| DecodeError::TooLong { len: text.len() })?;

        Ok(Self { text: buf })
    }

    /// The command text
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Text length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false for a constructed command
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
