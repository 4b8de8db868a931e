//! Error types for captcha generation.

use std::path::PathBuf;

use thiserror::Error;
use voxcaptcha_dsp::{DecodeError, EncodeError};

use crate::pipeline::Stage;

/// Result type for speech engine operations.
pub type SpeechResult<T> = Result<T, SpeechError>;

/// Result type for pipeline operations.
pub type CaptchaResult<T> = Result<T, CaptchaError>;

/// Errors raised by the speech-synthesis collaborator.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// No espeak executable could be located.
    #[error("espeak executable not found. Install espeak-ng, or set VOXCAPTCHA_ESPEAK_PATH")]
    EngineNotFound,

    /// Failed to spawn the engine process.
    #[error("failed to spawn speech engine: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// Engine process timed out.
    #[error("speech engine timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Engine process exited with non-zero status.
    #[error("speech engine exited with status {exit_code}: {stderr}")]
    ProcessFailed { exit_code: i32, stderr: String },

    /// Engine finished but produced no audio.
    #[error("speech engine produced no audio at {path}")]
    EmptyOutput { path: PathBuf },

    /// Another thread panicked while holding the engine lock.
    #[error("speech engine lock poisoned")]
    LockPoisoned,

    /// I/O error on the temporary output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpeechError {
    /// Creates a process failure error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            SpeechError::EngineNotFound => "SPEECH_001",
            SpeechError::SpawnFailed(_) => "SPEECH_002",
            SpeechError::Timeout { .. } => "SPEECH_003",
            SpeechError::ProcessFailed { .. } => "SPEECH_004",
            SpeechError::EmptyOutput { .. } => "SPEECH_005",
            SpeechError::LockPoisoned => "SPEECH_006",
            SpeechError::Io(_) => "SPEECH_007",
        }
    }
}

/// Errors that abort a captcha pipeline run.
#[derive(Debug, Error)]
pub enum CaptchaError {
    /// Speech synthesis failed or returned unusable bytes.
    #[error("speech synthesis failed: {0}")]
    Synthesis(#[from] SpeechError),

    /// The synthesized container could not be decoded.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Encoding hit an invariant violation.
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// Requested text length is zero.
    #[error("invalid captcha length: {length}")]
    InvalidLength { length: usize },

    /// Configuration is unusable.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl CaptchaError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            CaptchaError::Synthesis(e) => e.code(),
            CaptchaError::Decode(e) => e.code(),
            CaptchaError::Encode(e) => e.code(),
            CaptchaError::InvalidLength { .. } => "CAPTCHA_001",
            CaptchaError::Config { .. } => "CAPTCHA_002",
        }
    }

    /// Pipeline stage the error arose in.
    pub fn stage(&self) -> Stage {
        match self {
            CaptchaError::Synthesis(_) => Stage::Synthesize,
            CaptchaError::Decode(_) => Stage::Decode,
            CaptchaError::Encode(_) => Stage::Encode,
            CaptchaError::InvalidLength { .. } | CaptchaError::Config { .. } => {
                Stage::ComposePhrase
            }
        }
    }
}
