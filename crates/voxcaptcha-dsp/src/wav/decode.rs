//! WAV container decoding to a mono [`SampleBuffer`].
//!
//! Header parsing is delegated to `hound`. Sample values are then normalized to
//! a 16-bit-equivalent integer range by a [`SampleDepth`] strategy, downmixed
//! to mono, and scaled into floats by `1 / 32768`.

use std::io::Cursor;

use crate::buffer::SampleBuffer;
use crate::error::DecodeError;

use super::format::WavFormat;

/// Divisor mapping a 16-bit-equivalent integer to a float in [-1.0, 1.0).
pub const PCM16_SCALE: f64 = 32768.0;

/// Decode strategy keyed by sample width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDepth {
    /// Unsigned 8-bit, shifted by 128 and scaled by 256.
    Unsigned8,
    /// Signed 16-bit, used directly.
    Signed16,
    /// Signed 24- or 32-bit, arithmetic-shifted down to 16-bit magnitude.
    Wide {
        /// Bytes per sample (3 or 4).
        bytes: u8,
    },
}

impl SampleDepth {
    /// Selects the strategy for a declared bit depth.
    pub fn from_bits(bits: u16) -> Result<Self, DecodeError> {
        match bits {
            8 => Ok(SampleDepth::Unsigned8),
            16 => Ok(SampleDepth::Signed16),
            24 => Ok(SampleDepth::Wide { bytes: 3 }),
            32 => Ok(SampleDepth::Wide { bytes: 4 }),
            _ => Err(DecodeError::UnsupportedBitDepth { bits }),
        }
    }

    /// Normalizes a signed sample read by `hound` to 16-bit-equivalent range.
    ///
    /// `hound` already re-centres 8-bit data, so `raw` is `byte - 128` there.
    pub fn to_pcm16(self, raw: i32) -> i32 {
        match self {
            SampleDepth::Unsigned8 => raw * 256,
            SampleDepth::Signed16 => raw,
            SampleDepth::Wide { bytes } => raw >> (8 * (u32::from(bytes) - 2)),
        }
    }
}

/// Channel layouts the decoder accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// One channel.
    Mono,
    /// Two interleaved channels.
    Stereo,
}

impl ChannelLayout {
    /// Selects the layout for a declared channel count.
    pub fn from_count(channels: u16) -> Result<Self, DecodeError> {
        match channels {
            1 => Ok(ChannelLayout::Mono),
            2 => Ok(ChannelLayout::Stereo),
            _ => Err(DecodeError::UnsupportedChannels { channels }),
        }
    }

    /// Reduces interleaved samples to one channel.
    ///
    /// Stereo pairs are averaged with flooring integer division; a dangling
    /// final sample is kept as-is.
    pub fn downmix(self, samples: Vec<i32>) -> Vec<i32> {
        match self {
            ChannelLayout::Mono => samples,
            ChannelLayout::Stereo => samples
                .chunks(2)
                .map(|frame| frame.iter().sum::<i32>().div_euclid(frame.len() as i32))
                .collect(),
        }
    }
}

/// Decoded header metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    /// Declared container format.
    pub format: WavFormat,
    /// Frames in the data chunk.
    pub frames: u32,
}

/// Reads only the header of a WAV container.
pub fn probe(bytes: &[u8]) -> Result<WavInfo, DecodeError> {
    let reader = hound::WavReader::new(Cursor::new(bytes))?;
    Ok(WavInfo {
        format: reader.spec().into(),
        frames: reader.duration(),
    })
}

/// Decodes a PCM WAV container into a mono buffer at the container's rate.
///
/// Fails without returning partial samples when the header is malformed, the
/// data chunk is truncated, the bit depth is not 8/16/24/32, the samples are
/// not integer PCM, or there are more than two channels.
pub fn decode(bytes: &[u8]) -> Result<SampleBuffer, DecodeError> {
    let reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int {
        return Err(DecodeError::UnsupportedFormat);
    }
    let layout = ChannelLayout::from_count(spec.channels)?;
    let depth = SampleDepth::from_bits(spec.bits_per_sample)?;

    let raw = reader
        .into_samples::<i32>()
        .map(|sample| sample.map(|value| depth.to_pcm16(value)))
        .collect::<Result<Vec<i32>, hound::Error>>()?;

    let samples = layout
        .downmix(raw)
        .into_iter()
        .map(|value| f64::from(value) / PCM16_SCALE)
        .collect();

    log::debug!(
        "decoded {} Hz, {} ch, {}-bit container",
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample
    );

    SampleBuffer::new(samples, spec.sample_rate).map_err(|_| DecodeError::InvalidSampleRate {
        rate: spec.sample_rate,
    })
}
