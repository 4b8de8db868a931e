//! Tests for the WAV module.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use crate::buffer::SampleBuffer;
use crate::error::DecodeError;

use super::decode::{decode, probe, ChannelLayout, SampleDepth};
use super::format::WavFormat;
use super::writer::{encode, encode_buffer, samples_to_pcm16, write_wav};

/// Builds an integer PCM container with hound at an arbitrary depth/layout.
fn hound_wav(channels: u16, bits: u16, sample_rate: u32, samples: &[i32]) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: bits,
        sample_format: hound::SampleFormat::Int,
    };
    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
        for &s in samples {
            match bits {
                8 => writer.write_sample(s as i8).unwrap(),
                16 => writer.write_sample(s as i16).unwrap(),
                _ => writer.write_sample(s).unwrap(),
            }
        }
        writer.finalize().unwrap();
    }
    bytes
}

fn pcm16_at(pcm: &[u8], index: usize) -> i16 {
    i16::from_le_bytes([pcm[index * 2], pcm[index * 2 + 1]])
}

// =========================================================================
// WavFormat tests
// =========================================================================

#[test]
fn test_wav_format_mono() {
    let format = WavFormat::mono(22050);
    assert_eq!(format.channels, 1);
    assert_eq!(format.sample_rate, 22050);
    assert_eq!(format.bits_per_sample, 16);
}

#[test]
fn test_derived_sizes() {
    let mono = WavFormat::mono(44100);
    assert_eq!(mono.bytes_per_sample(), 2);
    assert_eq!(mono.block_align(), 2);
    assert_eq!(mono.byte_rate(), 88200);

    let stereo24 = WavFormat {
        channels: 2,
        sample_rate: 48000,
        bits_per_sample: 24,
    };
    assert_eq!(stereo24.block_align(), 6);
    assert_eq!(stereo24.byte_rate(), 288000);
}

// =========================================================================
// Quantization tests
// =========================================================================

#[test]
fn test_samples_to_pcm16_truncates() {
    let pcm = samples_to_pcm16(&[0.0, 0.5, -0.5, 0.99999]);

    assert_eq!(pcm.len(), 8);
    assert_eq!(pcm16_at(&pcm, 0), 0);
    // 0.5 * 32767 = 16383.5, truncated toward zero
    assert_eq!(pcm16_at(&pcm, 1), 16383);
    assert_eq!(pcm16_at(&pcm, 2), -16383);
    assert_eq!(pcm16_at(&pcm, 3), 32766);
}

#[test]
fn test_samples_to_pcm16_clamps() {
    let pcm = samples_to_pcm16(&[1.0, -1.0, 1.5, -7.0, f64::INFINITY, f64::NEG_INFINITY]);

    assert_eq!(pcm16_at(&pcm, 0), 32767);
    assert_eq!(pcm16_at(&pcm, 1), -32767);
    assert_eq!(pcm16_at(&pcm, 2), 32767);
    assert_eq!(pcm16_at(&pcm, 3), -32767);
    assert_eq!(pcm16_at(&pcm, 4), 32767);
    assert_eq!(pcm16_at(&pcm, 5), -32767);
}

#[test]
fn test_samples_to_pcm16_nan_is_silence() {
    let pcm = samples_to_pcm16(&[f64::NAN]);
    assert_eq!(pcm16_at(&pcm, 0), 0);
}

// =========================================================================
// Header tests
// =========================================================================

#[test]
fn test_encode_header_fields() {
    let wav = encode(&[0.0; 10], 22050).unwrap();

    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");

    let fmt_size = u32::from_le_bytes([wav[16], wav[17], wav[18], wav[19]]);
    assert_eq!(fmt_size, 16);

    let audio_format = u16::from_le_bytes([wav[20], wav[21]]);
    assert_eq!(audio_format, 1);

    let channels = u16::from_le_bytes([wav[22], wav[23]]);
    assert_eq!(channels, 1);

    let sample_rate = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
    assert_eq!(sample_rate, 22050);

    let byte_rate = u32::from_le_bytes([wav[28], wav[29], wav[30], wav[31]]);
    assert_eq!(byte_rate, 44100);

    let bits_per_sample = u16::from_le_bytes([wav[34], wav[35]]);
    assert_eq!(bits_per_sample, 16);

    assert_eq!(&wav[36..40], b"data");
    let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
    assert_eq!(data_size, 20);
}

#[test]
fn test_encode_file_size_field() {
    let wav = encode(&[0.1; 100], 8000).unwrap();

    let file_size = u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]);
    assert_eq!(file_size, wav.len() as u32 - 8);
    assert_eq!(wav.len(), 244);
}

#[test]
fn test_encode_empty_audio() {
    let wav = encode(&[], 22050).unwrap();
    assert_eq!(wav.len(), 44);

    let decoded = decode(&wav).unwrap();
    assert!(decoded.is_empty());
    assert_eq!(decoded.sample_rate(), 22050);
}

#[test]
fn test_encode_determinism() {
    let samples: Vec<f64> = (0..500).map(|i| (i as f64 * 0.01).sin()).collect();
    assert_eq!(encode(&samples, 22050).unwrap(), encode(&samples, 22050).unwrap());
}

#[test]
fn test_encode_buffer_uses_buffer_rate() {
    let buffer = SampleBuffer::new(vec![0.25; 4], 16000).unwrap();
    let wav = encode_buffer(&buffer).unwrap();
    assert_eq!(probe(&wav).unwrap().format, WavFormat::mono(16000));
}

#[test]
fn test_write_wav_matches_encode() {
    let samples = [0.5, -0.5];
    let mut manual = Vec::new();
    write_wav(&mut manual, &WavFormat::mono(44100), &samples_to_pcm16(&samples))
        .expect("should write");

    assert_eq!(manual, encode(&samples, 44100).unwrap());
}

// =========================================================================
// Decode strategy tests
// =========================================================================

#[test]
fn test_sample_depth_selection() {
    assert_eq!(SampleDepth::from_bits(8).unwrap(), SampleDepth::Unsigned8);
    assert_eq!(SampleDepth::from_bits(16).unwrap(), SampleDepth::Signed16);
    assert_eq!(SampleDepth::from_bits(24).unwrap(), SampleDepth::Wide { bytes: 3 });
    assert_eq!(SampleDepth::from_bits(32).unwrap(), SampleDepth::Wide { bytes: 4 });

    for bits in [0, 4, 12, 20, 40, 64] {
        assert!(matches!(
            SampleDepth::from_bits(bits),
            Err(DecodeError::UnsupportedBitDepth { bits: b }) if b == bits
        ));
    }
}

#[test]
fn test_sample_depth_normalization() {
    assert_eq!(SampleDepth::Unsigned8.to_pcm16(-128), -32768);
    assert_eq!(SampleDepth::Unsigned8.to_pcm16(127), 32512);
    assert_eq!(SampleDepth::Signed16.to_pcm16(-1234), -1234);
    assert_eq!(SampleDepth::Wide { bytes: 3 }.to_pcm16(0x40_0000), 0x4000);
    assert_eq!(SampleDepth::Wide { bytes: 3 }.to_pcm16(-1), -1);
    assert_eq!(SampleDepth::Wide { bytes: 4 }.to_pcm16(1 << 30), 0x4000);
}

#[test]
fn test_channel_layout_downmix() {
    assert_eq!(ChannelLayout::Mono.downmix(vec![1, 2, 3]), vec![1, 2, 3]);
    // Flooring average, dangling sample kept
    assert_eq!(
        ChannelLayout::Stereo.downmix(vec![1, 2, -1, -2, 10, 10, 7]),
        vec![1, -2, 10, 7]
    );
    assert!(matches!(
        ChannelLayout::from_count(3),
        Err(DecodeError::UnsupportedChannels { channels: 3 })
    ));
}

// =========================================================================
// Decode tests
// =========================================================================

#[test]
fn test_decode_16bit_mono() {
    let wav = hound_wav(1, 16, 22050, &[0, 16384, -16384, -32768, 32767]);
    let buffer = decode(&wav).unwrap();

    assert_eq!(buffer.sample_rate(), 22050);
    assert_eq!(buffer.channels(), 1);
    assert_eq!(
        buffer.samples(),
        &[0.0, 0.5, -0.5, -1.0, 32767.0 / 32768.0]
    );
}

#[test]
fn test_decode_8bit() {
    let wav = hound_wav(1, 8, 8000, &[0, 64, -128]);
    let buffer = decode(&wav).unwrap();

    assert_eq!(buffer.samples(), &[0.0, 0.5, -1.0]);
}

#[test]
fn test_decode_24bit() {
    let wav = hound_wav(1, 24, 48000, &[0x40_0000, -0x40_0000, 0]);
    let buffer = decode(&wav).unwrap();

    assert_eq!(buffer.samples(), &[0.5, -0.5, 0.0]);
}

#[test]
fn test_decode_32bit() {
    let wav = hound_wav(1, 32, 44100, &[1 << 30, -(1 << 30)]);
    let buffer = decode(&wav).unwrap();

    assert_eq!(buffer.samples(), &[0.5, -0.5]);
}

#[test]
fn test_decode_stereo_equal_channels_matches_either_channel() {
    let channel = [0, 1000, -1000, 16384, -32768, 32767];
    let interleaved: Vec<i32> = channel.iter().flat_map(|&s| [s, s]).collect();

    let stereo = decode(&hound_wav(2, 16, 22050, &interleaved)).unwrap();
    let mono = decode(&hound_wav(1, 16, 22050, &channel)).unwrap();

    assert_eq!(stereo, mono);
}

#[test]
fn test_decode_stereo_averages_pairs() {
    let wav = hound_wav(2, 16, 22050, &[16384, 0, -16384, -16383]);
    let buffer = decode(&wav).unwrap();

    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer.samples()[0], 8192.0 / 32768.0);
    // (-32767) floor-divided by 2
    assert_eq!(buffer.samples()[1], -16384.0 / 32768.0);
}

#[test]
fn test_decode_rejects_three_channels() {
    let wav = hound_wav(3, 16, 22050, &[0; 9]);
    assert!(matches!(
        decode(&wav),
        Err(DecodeError::UnsupportedChannels { channels: 3 })
    ));
}

#[test]
fn test_decode_rejects_float_format() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 22050,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
        writer.write_sample(0.25f32).unwrap();
        writer.finalize().unwrap();
    }

    assert!(matches!(decode(&bytes), Err(DecodeError::UnsupportedFormat)));
}

#[test]
fn test_decode_rejects_odd_bit_depth() {
    let format = WavFormat {
        channels: 1,
        sample_rate: 22050,
        bits_per_sample: 12,
    };
    let mut wav = Vec::new();
    write_wav(&mut wav, &format, &[0u8; 8]).unwrap();

    assert!(decode(&wav).is_err());
}

#[test]
fn test_decode_truncated_header_fails() {
    let wav = encode(&[0.5; 32], 22050).unwrap();

    for cut in [0, 4, 12, 20, 30, 40] {
        assert!(
            matches!(decode(&wav[..cut]), Err(DecodeError::Malformed { .. })),
            "cut at {cut} should be malformed"
        );
    }
}

#[test]
fn test_decode_truncated_data_fails() {
    let wav = encode(&[0.5; 32], 22050).unwrap();
    let truncated = &wav[..wav.len() - 10];

    assert!(matches!(decode(truncated), Err(DecodeError::Malformed { .. })));
}

#[test]
fn test_decode_garbage_fails() {
    assert!(matches!(
        decode(b"definitely not a RIFF container"),
        Err(DecodeError::Malformed { .. })
    ));
}

#[test]
fn test_probe_reports_header() {
    let wav = hound_wav(2, 24, 48000, &[0; 20]);
    let info = probe(&wav).unwrap();

    assert_eq!(info.format.channels, 2);
    assert_eq!(info.format.bits_per_sample, 24);
    assert_eq!(info.format.sample_rate, 48000);
    assert_eq!(info.frames, 10);
}

// =========================================================================
// Encode / decode round trip
// =========================================================================

#[test]
fn test_round_trip_within_one_step() {
    let samples = vec![-1.0, 0.0, 0.5, 0.5, -1.0, 0.0];
    let wav = encode(&samples, 22050).unwrap();
    let decoded = decode(&wav).unwrap();

    assert_eq!(decoded.len(), samples.len());
    assert_eq!(decoded.sample_rate(), 22050);
    for (original, restored) in samples.iter().zip(decoded.samples()) {
        assert!(
            (original - restored).abs() <= 1.0 / 32768.0,
            "{original} -> {restored}"
        );
    }
}
