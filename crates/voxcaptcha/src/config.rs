//! Captcha generation settings.
//!
//! Every field has a default, so a JSON file only needs the keys it overrides.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use voxcaptcha_dsp::CANONICAL_SAMPLE_RATE;

use crate::error::{CaptchaError, CaptchaResult};
use crate::text::Charset;

/// Speech rates (words per minute) the engine is driven at.
pub const SPEECH_RATE_LIMITS: RangeInclusive<u32> = 120..=160;

/// Default timeout for one engine invocation.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Speech engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EspeakConfig {
    /// Explicit path to `espeak-ng` or `espeak`.
    pub executable: Option<PathBuf>,
    /// Only voices for this language (or its regional variants) are drawn.
    pub language: String,
    /// Kill the engine after this many seconds.
    pub timeout_secs: u64,
}

impl Default for EspeakConfig {
    fn default() -> Self {
        Self {
            executable: None,
            language: "en".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EspeakConfig {
    /// Sets the engine executable path.
    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Sets the voice language.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Captcha generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptchaConfig {
    /// Characters per captcha.
    pub length: usize,
    /// Characters the text is drawn from.
    pub charset: Charset,
    /// Output sample rate in Hz.
    pub target_rate: u32,
    /// Slowest speech rate drawn.
    pub speech_rate_min: u32,
    /// Fastest speech rate drawn.
    pub speech_rate_max: u32,
    /// Engine volume in [0, 1].
    pub volume: f64,
    /// Engine settings.
    pub engine: EspeakConfig,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            length: 5,
            charset: Charset::Digits,
            target_rate: CANONICAL_SAMPLE_RATE,
            speech_rate_min: *SPEECH_RATE_LIMITS.start(),
            speech_rate_max: *SPEECH_RATE_LIMITS.end(),
            volume: 0.9,
            engine: EspeakConfig::default(),
        }
    }
}

impl CaptchaConfig {
    /// Loads and validates settings from a JSON file.
    pub fn load(path: &Path) -> CaptchaResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CaptchaError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parses and validates settings from a JSON string.
    pub fn from_json(json: &str) -> CaptchaResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CaptchaError::config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges that the pipeline relies on.
    pub fn validate(&self) -> CaptchaResult<()> {
        if self.length == 0 {
            return Err(CaptchaError::InvalidLength { length: 0 });
        }
        if self.target_rate == 0 {
            return Err(CaptchaError::config("target_rate must be positive"));
        }
        if self.speech_rate_min > self.speech_rate_max
            || !SPEECH_RATE_LIMITS.contains(&self.speech_rate_min)
            || !SPEECH_RATE_LIMITS.contains(&self.speech_rate_max)
        {
            return Err(CaptchaError::config(format!(
                "speech rate range {}..={} must lie within {}..={}",
                self.speech_rate_min,
                self.speech_rate_max,
                SPEECH_RATE_LIMITS.start(),
                SPEECH_RATE_LIMITS.end()
            )));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(CaptchaError::config(format!(
                "volume {} must lie within 0..=1",
                self.volume
            )));
        }
        Ok(())
    }

    /// Speech rates to draw from.
    pub fn speech_rates(&self) -> RangeInclusive<u32> {
        self.speech_rate_min..=self.speech_rate_max
    }
}
