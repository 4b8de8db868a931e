//! Error types for the signal core.

use thiserror::Error;

/// Result type for buffer construction.
pub type DspResult<T> = Result<T, DspError>;

/// Errors raised when constructing sample buffers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DspError {
    /// Sample rate must be a positive integer.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },
}

/// Errors that can occur while decoding a PCM container.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Header or data chunk could not be parsed.
    #[error("malformed WAV container: {message}")]
    Malformed {
        /// Parser message.
        message: String,
    },

    /// Bit depth outside the supported 8/16/24/32 set.
    #[error("unsupported bit depth: {bits} bits per sample")]
    UnsupportedBitDepth {
        /// Declared bits per sample.
        bits: u16,
    },

    /// More than two channels.
    #[error("unsupported channel count: {channels}")]
    UnsupportedChannels {
        /// Declared channel count.
        channels: u16,
    },

    /// IEEE float or other non-integer sample format.
    #[error("unsupported sample format: only integer PCM is decoded")]
    UnsupportedFormat,

    /// Header declared a zero sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The declared rate.
        rate: u32,
    },
}

impl DecodeError {
    /// Creates a malformed-container error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::Malformed { .. } => "DECODE_001",
            DecodeError::UnsupportedBitDepth { .. } => "DECODE_002",
            DecodeError::UnsupportedChannels { .. } => "DECODE_003",
            DecodeError::UnsupportedFormat => "DECODE_004",
            DecodeError::InvalidSampleRate { .. } => "DECODE_005",
        }
    }
}

impl From<hound::Error> for DecodeError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::Unsupported => Self::UnsupportedFormat,
            other => Self::malformed(other.to_string()),
        }
    }
}

/// Errors that can occur while encoding. Only reachable on invariant violations.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// PCM data does not fit a 32-bit RIFF chunk size.
    #[error("PCM data too large for a WAV container: {bytes} bytes")]
    DataTooLarge {
        /// Size of the PCM payload.
        bytes: usize,
    },

    /// I/O error from the underlying writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EncodeError {
    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            EncodeError::DataTooLarge { .. } => "ENCODE_001",
            EncodeError::Io(_) => "ENCODE_002",
        }
    }
}
