//! Generate command implementation
//!
//! Speaks a fresh captcha through espeak and prints the answer and audio.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;

use voxcaptcha::{AudioCaptcha, EspeakEngine};

use super::load_config;

/// Run the generate command
///
/// # Arguments
/// * `length` - Characters to generate (config default when `None`)
/// * `seed` - Base seed for reproducible output (random when `None`)
/// * `config_path` - Optional JSON settings file
/// * `out` - Optional path to also write the WAV clip
/// * `json_output` - Print `{ "text", "audio" }` JSON instead of a summary
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    length: Option<usize>,
    seed: Option<u64>,
    config_path: Option<&str>,
    out: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let length = length.unwrap_or(config.length);
    log::debug!("generate config: {:?}", config);

    let engine = EspeakEngine::new(config.engine.clone()).context("Failed to start speech engine")?;
    let captcha = AudioCaptcha::new(engine, config)?;

    let audio = match seed {
        Some(seed) => captcha.generate_seeded(length, seed),
        None => captcha.generate(length),
    }
    .with_context(|| format!("Failed to generate a {}-character captcha", length))?;

    if let Some(path) = out {
        fs::write(path, &audio.wav_data)
            .with_context(|| format!("Failed to write WAV file: {}", path))?;
    }

    if json_output {
        let json = serde_json::to_string_pretty(&audio.payload())?;
        println!("{}", json);
    } else {
        println!("{} {}", "Text:".cyan().bold(), audio.text);
        println!(
            "  {} {} bytes, {:.2} s",
            "->".green(),
            audio.wav_data.len(),
            clip_seconds(&audio.wav_data)
        );
        if let Some(path) = out {
            println!("  {} wrote {}", "ok".green(), path);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn clip_seconds(wav_data: &[u8]) -> f64 {
    voxcaptcha_dsp::wav::probe(wav_data)
        .map(|info| f64::from(info.frames) / f64::from(info.format.sample_rate.max(1)))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_seconds() {
        let wav = voxcaptcha_dsp::wav::encode(&[0.0; 22050], 22050).unwrap();
        assert_eq!(clip_seconds(&wav), 1.0);
        assert_eq!(clip_seconds(b"junk"), 0.0);
    }
}
