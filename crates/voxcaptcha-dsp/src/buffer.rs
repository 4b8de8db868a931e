//! Mono floating-point sample buffer.

use crate::error::{DspError, DspResult};

/// Mono audio samples paired with their sample rate.
///
/// Samples nominally lie in `[-1.0, 1.0]`. Distortion passes may push them
/// past that range; only the encoder clamps. The rate is always non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Creates a buffer, rejecting a zero sample rate.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> DspResult<Self> {
        if sample_rate == 0 {
            return Err(DspError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Creates a buffer of `len` zero samples.
    pub fn silence(len: usize, sample_rate: u32) -> DspResult<Self> {
        Self::new(vec![0.0; len], sample_rate)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count. Buffers are always downmixed to mono.
    pub fn channels(&self) -> u16 {
        1
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Borrows the samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Mutably borrows the samples. Length cannot change through this slice.
    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    /// Consumes the buffer, returning the samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Peak absolute amplitude, or 0.0 for an empty buffer.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()))
    }
}
