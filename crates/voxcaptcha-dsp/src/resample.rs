//! Linear-interpolation sample rate conversion.

use crate::buffer::SampleBuffer;
use crate::error::{DspError, DspResult};

/// Resamples `buffer` to `target_rate` by linear interpolation.
///
/// Returns the input unchanged when the rates already match. Otherwise the
/// output holds `floor(len / (source_rate / target_rate))` samples; output `i`
/// reads the source at position `i * ratio`, interpolating between the two
/// neighbouring samples and falling back to the last sample (or silence) past
/// the end. Deterministic, no randomness.
pub fn resample(buffer: SampleBuffer, target_rate: u32) -> DspResult<SampleBuffer> {
    if target_rate == 0 {
        return Err(DspError::InvalidSampleRate { rate: target_rate });
    }
    if buffer.sample_rate() == target_rate {
        return Ok(buffer);
    }

    let ratio = f64::from(buffer.sample_rate()) / f64::from(target_rate);
    let resampled = interpolate(buffer.samples(), ratio);

    log::debug!(
        "resampled {} -> {} samples ({} Hz -> {} Hz)",
        buffer.len(),
        resampled.len(),
        buffer.sample_rate(),
        target_rate
    );

    SampleBuffer::new(resampled, target_rate)
}

/// Output length for a given input length and source/target ratio.
pub fn output_len(input_len: usize, ratio: f64) -> usize {
    (input_len as f64 / ratio) as usize
}

fn interpolate(samples: &[f64], ratio: f64) -> Vec<f64> {
    let new_len = output_len(samples.len(), ratio);

    (0..new_len)
        .map(|i| {
            let src = i as f64 * ratio;
            let idx = src as usize;
            let frac = src - idx as f64;

            match (samples.get(idx), samples.get(idx + 1)) {
                (Some(&a), Some(&b)) => a * (1.0 - frac) + b * frac,
                (Some(&a), None) => a,
                _ => 0.0,
            }
        })
        .collect()
}
