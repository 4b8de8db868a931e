//! Bot-resistant noise and distortion.
//!
//! A [`DistortionProfile`] is drawn fresh for every clip and applied in four
//! passes: white noise, mains hum, crackle bursts, then warble. Warble is
//! multiplicative, so it runs last and modulates the added noise as well.
//!
//! All randomness comes from the caller's `Rng`; with a seeded source the
//! output is fully reproducible.

use std::f64::consts::PI;
use std::ops::{Range, RangeInclusive};

use rand::Rng;

use crate::buffer::SampleBuffer;

/// White noise amplitude range.
pub const NOISE_VOLUME: RangeInclusive<f64> = 0.02..=0.06;
/// Hum frequency range in Hz.
pub const HUM_FREQUENCY: RangeInclusive<f64> = 45.0..=65.0;
/// Hum amplitude range.
pub const HUM_VOLUME: RangeInclusive<f64> = 0.02..=0.05;
/// Number of crackle bursts per clip.
pub const CRACKLE_COUNT: RangeInclusive<usize> = 3..=8;
/// Crackle burst length range in samples.
pub const CRACKLE_LENGTH: RangeInclusive<usize> = 80..=300;
/// Crackle amplitude range.
pub const CRACKLE_VOLUME: RangeInclusive<f64> = 0.03..=0.08;
/// Start offsets are drawn from `[0, len - CRACKLE_TAIL]`.
pub const CRACKLE_TAIL: usize = 500;
/// Warble frequency range in Hz.
pub const WARBLE_FREQUENCY: RangeInclusive<f64> = 2.0..=4.0;
/// Warble depth range.
pub const WARBLE_DEPTH: RangeInclusive<f64> = 0.003..=0.008;

/// One randomly placed segment of added noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrackleBurst {
    /// First affected sample index.
    pub start: usize,
    /// Burst length in samples.
    pub length: usize,
    /// Peak amplitude of the added noise.
    pub volume: f64,
}

impl CrackleBurst {
    /// Index range touched in a buffer of `len` samples. Always within bounds.
    pub fn span(&self, len: usize) -> Range<usize> {
        let end = self.start.saturating_add(self.length).min(len);
        self.start.min(end)..end
    }
}

/// Randomly drawn parameters for one distortion run.
#[derive(Debug, Clone, PartialEq)]
pub struct DistortionProfile {
    /// White noise amplitude.
    pub noise_volume: f64,
    /// Hum frequency in Hz.
    pub hum_frequency: f64,
    /// Hum amplitude.
    pub hum_volume: f64,
    /// Crackle bursts in application order.
    pub bursts: Vec<CrackleBurst>,
    /// Warble frequency in Hz.
    pub warble_frequency: f64,
    /// Warble modulation depth.
    pub warble_depth: f64,
}

impl DistortionProfile {
    /// Draws a profile for a buffer of `len` samples.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Self {
        let noise_volume = rng.gen_range(NOISE_VOLUME);
        let hum_frequency = rng.gen_range(HUM_FREQUENCY);
        let hum_volume = rng.gen_range(HUM_VOLUME);

        let count = rng.gen_range(CRACKLE_COUNT);
        let last_start = len.saturating_sub(CRACKLE_TAIL);
        let bursts = (0..count)
            .map(|_| CrackleBurst {
                start: rng.gen_range(0..=last_start),
                length: rng.gen_range(CRACKLE_LENGTH),
                volume: rng.gen_range(CRACKLE_VOLUME),
            })
            .collect();

        let warble_frequency = rng.gen_range(WARBLE_FREQUENCY);
        let warble_depth = rng.gen_range(WARBLE_DEPTH);

        Self {
            noise_volume,
            hum_frequency,
            hum_volume,
            bursts,
            warble_frequency,
            warble_depth,
        }
    }

    /// Applies the four passes in order. Per-sample noise draws come from `rng`.
    pub fn apply<R: Rng + ?Sized>(&self, buffer: &mut SampleBuffer, rng: &mut R) {
        let sample_rate = f64::from(buffer.sample_rate());
        let samples = buffer.samples_mut();

        add_white_noise(samples, self.noise_volume, rng);
        add_hum(samples, sample_rate, self.hum_frequency, self.hum_volume);
        for burst in &self.bursts {
            add_crackle(samples, burst, rng);
        }
        apply_warble(samples, sample_rate, self.warble_frequency, self.warble_depth);
    }
}

/// Draws a fresh profile and applies it. Length and rate are preserved.
pub fn distort<R: Rng + ?Sized>(mut buffer: SampleBuffer, rng: &mut R) -> SampleBuffer {
    let profile = DistortionProfile::draw(rng, buffer.len());
    log::debug!(
        "distortion: noise {:.4}, hum {:.1} Hz @ {:.4}, {} bursts, warble {:.2} Hz @ {:.4}",
        profile.noise_volume,
        profile.hum_frequency,
        profile.hum_volume,
        profile.bursts.len(),
        profile.warble_frequency,
        profile.warble_depth
    );
    profile.apply(&mut buffer, rng);
    buffer
}

/// Adds independent uniform noise in `[-volume, volume]` to every sample.
pub fn add_white_noise<R: Rng + ?Sized>(samples: &mut [f64], volume: f64, rng: &mut R) {
    for sample in samples.iter_mut() {
        *sample += uniform(rng, volume);
    }
}

/// Adds `volume * sin(2π · frequency · t)` with `t = index / sample_rate`.
pub fn add_hum(samples: &mut [f64], sample_rate: f64, frequency: f64, volume: f64) {
    for (i, sample) in samples.iter_mut().enumerate() {
        let t = i as f64 / sample_rate;
        *sample += volume * (2.0 * PI * frequency * t).sin();
    }
}

/// Adds uniform noise over the burst's span, clipped to the slice.
pub fn add_crackle<R: Rng + ?Sized>(samples: &mut [f64], burst: &CrackleBurst, rng: &mut R) {
    let span = burst.span(samples.len());
    for sample in &mut samples[span] {
        *sample += uniform(rng, burst.volume);
    }
}

/// Multiplies every sample by `1 + depth · sin(2π · frequency · t)`.
pub fn apply_warble(samples: &mut [f64], sample_rate: f64, frequency: f64, depth: f64) {
    for (i, sample) in samples.iter_mut().enumerate() {
        let t = i as f64 / sample_rate;
        *sample *= 1.0 + depth * (2.0 * PI * frequency * t).sin();
    }
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, volume: f64) -> f64 {
    if volume > 0.0 {
        rng.gen_range(-volume..=volume)
    } else {
        0.0
    }
}
