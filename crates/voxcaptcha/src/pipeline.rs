//! Audio captcha pipeline.
//!
//! One request runs ComposePhrase, Synthesize, Decode, Resample, Distort,
//! Encode and Package in order on the calling thread. The first failing stage
//! aborts the run and nothing partial is returned.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::Rng;
use serde::Serialize;
use voxcaptcha_dsp::rng::create_stage_rng;
use voxcaptcha_dsp::{distort, resample, wav};

use crate::config::CaptchaConfig;
use crate::error::{CaptchaError, CaptchaResult, SpeechResult};
use crate::speech::{SpeechGate, SpeechSettings, SpeechSynthesizer, Voice};
use crate::text::generate_text;
use crate::vocabulary::compose_phrase;

/// Prefix of the packaged audio string.
pub const DATA_URI_PREFIX: &str = "data:audio/wav;base64,";

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Text to spoken phrase.
    ComposePhrase,
    /// Phrase to engine WAV bytes.
    Synthesize,
    /// WAV bytes to samples.
    Decode,
    /// Samples to the canonical rate.
    Resample,
    /// Noise and warble.
    Distort,
    /// Samples to 16-bit mono WAV.
    Encode,
    /// WAV to data URI.
    Package,
}

impl Stage {
    /// Returns the string identifier for this stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ComposePhrase => "compose_phrase",
            Stage::Synthesize => "synthesize",
            Stage::Decode => "decode",
            Stage::Resample => "resample",
            Stage::Distort => "distort",
            Stage::Encode => "encode",
            Stage::Package => "package",
        }
    }
}

/// A finished captcha: the answer and the encoded clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaAudio {
    /// Verification text.
    pub text: String,
    /// 16-bit mono WAV bytes.
    pub wav_data: Vec<u8>,
}

impl CaptchaAudio {
    /// The clip as a `data:audio/wav;base64,` URI.
    pub fn data_uri(&self) -> String {
        wav_data_uri(&self.wav_data)
    }

    /// The artifact handed to callers.
    pub fn payload(&self) -> CaptchaPayload {
        CaptchaPayload {
            text: self.text.clone(),
            audio: self.data_uri(),
        }
    }
}

/// Serializable captcha artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptchaPayload {
    /// Verification text.
    pub text: String,
    /// `data:audio/wav;base64,...`
    pub audio: String,
}

/// Wraps WAV bytes as a base64 data URI.
pub fn wav_data_uri(wav: &[u8]) -> String {
    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + wav.len().div_ceil(3) * 4);
    uri.push_str(DATA_URI_PREFIX);
    STANDARD.encode_string(wav, &mut uri);
    uri
}

/// Decodes, resamples, distorts and re-encodes a WAV container.
pub fn degrade_wav<R: Rng + ?Sized>(
    wav_bytes: &[u8],
    target_rate: u32,
    rng: &mut R,
) -> CaptchaResult<Vec<u8>> {
    log::debug!("stage {}: {} bytes", Stage::Decode.as_str(), wav_bytes.len());
    let buffer = wav::decode(wav_bytes)?;

    log::debug!(
        "stage {}: {} Hz -> {} Hz",
        Stage::Resample.as_str(),
        buffer.sample_rate(),
        target_rate
    );
    let buffer = resample(buffer, target_rate).map_err(|e| CaptchaError::config(e.to_string()))?;

    log::debug!("stage {}: {} samples", Stage::Distort.as_str(), buffer.len());
    let buffer = distort(buffer, rng);

    log::debug!("stage {}", Stage::Encode.as_str());
    Ok(wav::encode(buffer.samples(), target_rate)?)
}

/// Generates spoken-character audio captchas.
pub struct AudioCaptcha<S> {
    gate: SpeechGate<S>,
    config: CaptchaConfig,
}

impl<S: SpeechSynthesizer> AudioCaptcha<S> {
    /// Creates a generator around `engine`, validating `config`.
    pub fn new(engine: S, config: CaptchaConfig) -> CaptchaResult<Self> {
        config.validate()?;
        Ok(Self {
            gate: SpeechGate::new(engine),
            config,
        })
    }

    /// Active settings.
    pub fn config(&self) -> &CaptchaConfig {
        &self.config
    }

    /// Voices offered by the engine.
    pub fn voices(&self) -> SpeechResult<Vec<Voice>> {
        self.gate.voices()
    }

    /// Generates a captcha of `length` characters from OS entropy.
    pub fn generate(&self, length: usize) -> CaptchaResult<CaptchaAudio> {
        self.generate_seeded(length, rand::random())
    }

    /// Generates a captcha whose text, voice choice and noise derive from `seed`.
    pub fn generate_seeded(&self, length: usize, seed: u64) -> CaptchaResult<CaptchaAudio> {
        if length == 0 {
            return Err(CaptchaError::InvalidLength { length });
        }

        let text = generate_text(
            length,
            self.config.charset,
            &mut create_stage_rng(seed, "text"),
        );
        self.run(
            text,
            &mut create_stage_rng(seed, "voice"),
            &mut create_stage_rng(seed, "noise"),
        )
    }

    /// Renders audio for caller-supplied text.
    pub fn render<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> CaptchaResult<CaptchaAudio> {
        if text.is_empty() {
            return Err(CaptchaError::InvalidLength { length: 0 });
        }

        let seed: u64 = rng.gen();
        self.run(
            text.to_string(),
            &mut create_stage_rng(seed, "voice"),
            &mut create_stage_rng(seed, "noise"),
        )
    }

    fn run<V, N>(
        &self,
        text: String,
        voice_rng: &mut V,
        noise_rng: &mut N,
    ) -> CaptchaResult<CaptchaAudio>
    where
        V: Rng + ?Sized,
        N: Rng + ?Sized,
    {
        let phrase = compose_phrase(&text);
        log::debug!("stage {}: {} chars", Stage::ComposePhrase.as_str(), text.len());

        let settings = SpeechSettings {
            rates: self.config.speech_rates(),
            volume: self.config.volume,
        };
        log::debug!("stage {}", Stage::Synthesize.as_str());
        let speech = self.gate.synthesize(&phrase, &settings, voice_rng)?;

        let wav_data = degrade_wav(&speech, self.config.target_rate, noise_rng)?;

        log::debug!("stage {}: {} bytes", Stage::Package.as_str(), wav_data.len());
        Ok(CaptchaAudio { text, wav_data })
    }
}
