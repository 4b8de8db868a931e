//! voxcaptcha
//!
//! Spoken audio captchas: a random digit string is read aloud by a local
//! speech engine, then degraded with noise so that speech recognisers struggle
//! while people can still follow it.
//!
//! # Architecture
//!
//! 1. **Phrase** - each character becomes a spoken word, separated by pauses
//!    ([`vocabulary`])
//! 2. **Speech** - the phrase is spoken through a [`speech::SpeechGate`], which
//!    serializes access to the engine and scopes its temporary WAV file
//! 3. **Signal** - decode, resample to 22050 Hz, distort, and encode, using
//!    `voxcaptcha-dsp`
//! 4. **Package** - the clip is wrapped as `data:audio/wav;base64,...`
//!
//! # Example
//!
//! ```ignore
//! use voxcaptcha::{AudioCaptcha, CaptchaConfig, EspeakEngine};
//!
//! let config = CaptchaConfig::default();
//! let engine = EspeakEngine::new(config.engine.clone())?;
//! let captcha = AudioCaptcha::new(engine, config)?;
//!
//! let payload = captcha.generate(5)?.payload();
//! println!("{} -> {} bytes of data URI", payload.text, payload.audio.len());
//! ```
//!
//! # Engine Requirements
//!
//! [`EspeakEngine`] needs `espeak-ng` (or `espeak`). It is searched for in:
//!
//! 1. `engine.executable` in the config
//! 2. `VOXCAPTCHA_ESPEAK_PATH` environment variable
//! 3. System PATH
//!
//! Any other engine can be plugged in by implementing
//! [`speech::SpeechSynthesizer`].

pub mod config;
pub mod error;
pub mod pipeline;
pub mod speech;
pub mod text;
pub mod vocabulary;

pub use config::{CaptchaConfig, EspeakConfig};
pub use error::{CaptchaError, CaptchaResult, SpeechError, SpeechResult};
pub use pipeline::{
    degrade_wav, wav_data_uri, AudioCaptcha, CaptchaAudio, CaptchaPayload, Stage, DATA_URI_PREFIX,
};
pub use speech::{EspeakEngine, SpeechGate, SpeechRequest, SpeechSynthesizer, Voice};
pub use text::Charset;
