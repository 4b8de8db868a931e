//! WAV container decode and encode.
//!
//! Decoding accepts integer PCM at 8/16/24/32 bits, mono or stereo, and yields
//! a mono [`SampleBuffer`](crate::SampleBuffer). Encoding always writes a
//! minimal 44-byte-header, 16-bit mono container with no variable metadata, so
//! identical samples give identical bytes.

mod decode;
mod format;
mod writer;

#[cfg(test)]
mod tests;

// Re-export public API
pub use decode::{decode, probe, ChannelLayout, SampleDepth, WavInfo, PCM16_SCALE};
pub use format::WavFormat;
pub use writer::{encode, encode_buffer, samples_to_pcm16, write_wav, HEADER_LEN};
