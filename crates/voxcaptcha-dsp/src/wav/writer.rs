//! Core WAV writing and PCM quantization.

use std::io::{self, Write};

use crate::buffer::SampleBuffer;
use crate::error::EncodeError;

use super::format::WavFormat;

/// Size of the RIFF + fmt + data headers written by [`write_wav`].
pub const HEADER_LEN: usize = 44;

/// Writes a complete WAV file to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - WAV format parameters
/// * `pcm_data` - Raw PCM samples as bytes
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    let file_size = 36 + data_size; // Total file size minus 8 bytes for RIFF header

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Chunk size (16 for PCM)
    writer.write_all(&1u16.to_le_bytes())?; // Audio format (1 = PCM)
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Quantizes f64 samples to little-endian 16-bit PCM.
///
/// Each sample is clamped to [-1.0, 1.0] and scaled by 32767, truncating
/// toward zero. NaN quantizes to 0.
pub fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);

    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        let pcm_value = (clamped * 32767.0) as i16;
        pcm.extend_from_slice(&pcm_value.to_le_bytes());
    }

    pcm
}

/// Encodes mono samples as a 16-bit mono WAV container at `sample_rate`.
///
/// Only fails when the data section cannot be described by a 32-bit chunk size.
pub fn encode(samples: &[f64], sample_rate: u32) -> Result<Vec<u8>, EncodeError> {
    let data_bytes = samples.len().saturating_mul(2);
    if data_bytes > (u32::MAX as usize) - 36 {
        return Err(EncodeError::DataTooLarge { bytes: data_bytes });
    }

    let pcm = samples_to_pcm16(samples);
    let format = WavFormat::mono(sample_rate);

    let mut wav = Vec::with_capacity(HEADER_LEN + pcm.len());
    write_wav(&mut wav, &format, &pcm)?;
    Ok(wav)
}

/// Encodes a [`SampleBuffer`] at its own sample rate.
pub fn encode_buffer(buffer: &SampleBuffer) -> Result<Vec<u8>, EncodeError> {
    encode(buffer.samples(), buffer.sample_rate())
}
