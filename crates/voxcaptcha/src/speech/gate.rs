//! Serialized access to a non-reentrant speech engine.

use std::sync::Mutex;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{SpeechError, SpeechResult};

use super::{SpeechRequest, SpeechSettings, SpeechSynthesizer, Voice};

/// Owns a speech engine and serializes every call into it.
///
/// The lock is held only while the engine runs, never across decode or
/// distortion, so other requests keep processing in parallel.
pub struct SpeechGate<S> {
    engine: Mutex<S>,
}

impl<S: SpeechSynthesizer> SpeechGate<S> {
    /// Wraps an engine.
    pub fn new(engine: S) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    /// Lists the engine's voices.
    pub fn voices(&self) -> SpeechResult<Vec<Voice>> {
        let mut engine = self.engine.lock().map_err(|_| SpeechError::LockPoisoned)?;
        engine.voices()
    }

    /// Speaks `text` and returns the engine's WAV bytes.
    ///
    /// The rate is drawn from `settings.rates`; when the engine offers more
    /// than one voice, one is picked uniformly. Output goes through a
    /// temporary file that is removed on every exit path.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        text: &str,
        settings: &SpeechSettings,
        rng: &mut R,
    ) -> SpeechResult<Vec<u8>> {
        let output = tempfile::Builder::new()
            .prefix("voxcaptcha_speech_")
            .suffix(".wav")
            .tempfile()?
            .into_temp_path();

        let rate = rng.gen_range(settings.rates.clone());

        {
            let mut engine = self.engine.lock().map_err(|_| SpeechError::LockPoisoned)?;
            let voices = engine.voices()?;
            let voice = if voices.len() > 1 {
                voices.choose(rng).cloned()
            } else {
                None
            };

            let request = SpeechRequest {
                text: text.to_string(),
                rate,
                volume: settings.volume,
                voice,
            };
            log::debug!(
                "synthesizing at {} wpm with voice {:?}",
                request.rate,
                request.voice.as_ref().map(|v| v.id.as_str())
            );
            engine.synthesize_to_file(&request, &output)?;
        }

        let bytes = std::fs::read(&output)?;
        if bytes.is_empty() {
            return Err(SpeechError::EmptyOutput {
                path: output.to_path_buf(),
            });
        }

        if let Err(e) = output.close() {
            log::warn!("failed to remove temporary speech file: {e}");
        }

        Ok(bytes)
    }
}
