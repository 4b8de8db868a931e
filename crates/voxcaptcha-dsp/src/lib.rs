//! voxcaptcha signal core
//!
//! This crate holds the numeric half of audio captcha generation: it turns the
//! WAV bytes produced by a speech engine into a degraded clip that is still
//! intelligible to people but hostile to speech recognisers.
//!
//! # Overview
//!
//! Data flows strictly one way, each stage taking ownership of the buffer:
//!
//! 1. [`wav::decode`] - integer PCM (8/16/24/32-bit, mono or stereo) to a mono
//!    [`SampleBuffer`] of floats
//! 2. [`resample::resample`] - linear interpolation to the canonical rate
//! 3. [`distort::distort`] - white noise, hum, crackle bursts, warble
//! 4. [`wav::encode`] - clamp, quantize, and write a 16-bit mono container
//!
//! # Determinism
//!
//! Decode, resample, and encode are pure. Distortion draws from an injected
//! `rand::Rng`; the [`rng`] helpers build seeded PCG32 streams so the same seed
//! and input always yield byte-identical output.
//!
//! # Example
//!
//! ```ignore
//! use voxcaptcha_dsp::{distort, resample, rng, wav};
//!
//! let buffer = wav::decode(&speech_wav)?;
//! let buffer = resample::resample(buffer, 22050)?;
//! let buffer = distort::distort(buffer, &mut rng::create_rng(42));
//! let clip = wav::encode_buffer(&buffer)?;
//! ```

pub mod buffer;
pub mod distort;
pub mod error;
pub mod resample;
pub mod rng;
pub mod wav;

// Re-export main types at crate root
pub use buffer::SampleBuffer;
pub use distort::{distort, CrackleBurst, DistortionProfile};
pub use error::{DecodeError, DspError, DspResult, EncodeError};
pub use resample::resample;

/// Canonical output sample rate in Hz.
pub const CANONICAL_SAMPLE_RATE: u32 = 22050;
