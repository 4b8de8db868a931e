//! Distort command implementation
//!
//! Applies the captcha degradation chain to an existing recording. Useful for
//! auditioning the noise without a speech engine installed.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;

use voxcaptcha::degrade_wav;
use voxcaptcha_dsp::rng::create_stage_rng;
use voxcaptcha_dsp::wav;

/// Run the distort command
///
/// # Arguments
/// * `input` - Source WAV (8/16/24/32-bit integer PCM, mono or stereo)
/// * `output` - Destination WAV (16-bit mono)
/// * `seed` - Base seed for the noise (random when `None`)
/// * `rate` - Output sample rate in Hz
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(input: &str, output: &str, seed: Option<u64>, rate: u32) -> Result<ExitCode> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read WAV file: {}", input))?;
    let info = wav::probe(&bytes).with_context(|| format!("Not a readable WAV file: {}", input))?;

    let seed = seed.unwrap_or_else(rand::random);
    let degraded = degrade_wav(&bytes, rate, &mut create_stage_rng(seed, "noise"))
        .with_context(|| format!("Failed to distort {}", input))?;

    fs::write(output, &degraded).with_context(|| format!("Failed to write WAV file: {}", output))?;

    println!("{}", "Distorted:".cyan().bold());
    println!(
        "  {} {} ({} Hz, {} ch, {}-bit, {} frames)",
        "in ".dimmed(),
        input,
        info.format.sample_rate,
        info.format.channels,
        info.format.bits_per_sample,
        info.frames
    );
    println!("  {} {} ({} Hz, seed {})", "out".dimmed(), output, rate, seed);

    Ok(ExitCode::SUCCESS)
}
